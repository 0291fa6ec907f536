//! # Templates Module
//!
//! This module loads license templates from the license-texts resource and
//! renders them into header text.
//!
//! The module includes:
//! - [`TemplateStore`] for parsing the resource and selecting a license block
//! - [`LicenseTemplate`] for a selected, not yet rendered block
//! - [`Placeholders`] for the values substituted into a template
//! - [`ResolvedHeader`] for the final header lines
//!
//! ## Resource format
//!
//! ```text
//! ; authoring comment
//! mit
//! [special_line]
//! Copyright (c) [year] [copyright_owner]
//! ...
//! +end
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ilt::templates::{Placeholders, TemplateStore};
//!
//! # fn main() -> Result<(), ilt::IltError> {
//! let store = TemplateStore::bundled();
//! let placeholders = Placeholders {
//!   year: Some(2023),
//!   copyright_holder: Some("Jane Doe".to_string()),
//!   special_line: None,
//! };
//!
//! let header = store.resolve_template("mit")?.apply(&placeholders);
//! assert_eq!(header.lines()[0], "Copyright (c) 2023 Jane Doe");
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::IltError;
use crate::verbose_log;

/// Canonical names of the licenses shipped in the bundled resource.
pub const LICENSES: [&str; 10] = [
  "apache",
  "bsl",
  "bsd2",
  "bsd3",
  "agpl",
  "gpl2",
  "gpl3",
  "lgpl",
  "mit",
  "unlicense",
];

const BUNDLED_LICENSE_TEXTS: &str = include_str!("../resources/LICENSE_TEXTS");

/// Lines starting with this marker are authoring comments.
const COMMENT_MARKER: char = ';';

/// Closes a license block.
const END_MARKER: &str = "+end";

const YEAR_TOKEN: &str = "[year]";
const COPYRIGHT_OWNER_TOKEN: &str = "[copyright_owner]";
const SPECIAL_LINE_TOKEN: &str = "[special_line]";

static TOKEN_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[(year|copyright_owner|special_line)\]").expect("token regex must compile"));

/// Parsed view over a license-texts resource.
#[derive(Debug, Clone)]
pub struct TemplateStore {
  source: Cow<'static, str>,
}

impl Default for TemplateStore {
  fn default() -> Self {
    Self::bundled()
  }
}

impl TemplateStore {
  /// Store backed by the resource compiled into the binary.
  pub const fn bundled() -> Self {
    Self {
      source: Cow::Borrowed(BUNDLED_LICENSE_TEXTS),
    }
  }

  /// Store backed by a custom resource file.
  ///
  /// The file is read once and closed before this returns.
  ///
  /// # Errors
  ///
  /// Returns [`IltError::TemplateSource`] if the file cannot be read.
  pub fn from_file(path: &Path) -> Result<Self, IltError> {
    verbose_log!("Loading license texts from: {}", path.display());

    let source = std::fs::read_to_string(path).map_err(|source| IltError::TemplateSource {
      path: path.to_path_buf(),
      source,
    })?;

    Ok(Self {
      source: Cow::Owned(source),
    })
  }

  /// Store backed by in-memory resource text.
  pub fn from_source(source: impl Into<String>) -> Self {
    Self {
      source: Cow::Owned(source.into()),
    }
  }

  /// Selects the block for `name`.
  ///
  /// Body lines are trimmed, authoring comments are skipped and trailing
  /// blank lines are dropped. Only the first block carrying `name` is used;
  /// a line inside another block never counts as a name.
  ///
  /// # Errors
  ///
  /// Returns [`IltError::LicenseNotFound`] when no block matches, or when the
  /// matching block has no content. An empty template is never returned.
  pub fn resolve_template(&self, name: &str) -> Result<LicenseTemplate, IltError> {
    if name.trim().is_empty() || name == END_MARKER {
      return Err(IltError::LicenseNotFound(name.to_string()));
    }

    let mut lines = Vec::new();
    let mut inside = false;
    let mut selected = false;

    for raw in self.source.lines() {
      if raw.starts_with(COMMENT_MARKER) {
        continue;
      }

      let line = raw.trim();
      if inside {
        if line == END_MARKER {
          if selected {
            break;
          }
          inside = false;
        } else if selected {
          lines.push(line.to_string());
        }
      } else if !line.is_empty() && line != END_MARKER {
        // Only a line outside every block opens one.
        inside = true;
        selected = line == name;
      }
    }

    while lines.last().is_some_and(|line: &String| line.is_empty()) {
      lines.pop();
    }

    if lines.is_empty() {
      debug!("No license block named '{}'", name);
      return Err(IltError::LicenseNotFound(name.to_string()));
    }

    debug!("Resolved license '{}' ({} lines)", name, lines.len());

    Ok(LicenseTemplate {
      name: name.to_string(),
      lines,
    })
  }

  /// Names of the blocks present in this resource, in resource order.
  pub fn names(&self) -> Vec<String> {
    let mut names = Vec::new();
    let mut inside = false;

    for raw in self.source.lines() {
      if raw.starts_with(COMMENT_MARKER) {
        continue;
      }

      let line = raw.trim();
      if inside {
        if line == END_MARKER {
          inside = false;
        }
      } else if !line.is_empty() && line != END_MARKER {
        names.push(line.to_string());
        inside = true;
      }
    }

    names
  }
}

/// Values substituted into a license template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
  /// Copyright year. `None` removes the year token.
  pub year: Option<u32>,
  /// Copyright holder. `None` substitutes an empty string.
  pub copyright_holder: Option<String>,
  /// Replaces the first template line when present and non-empty; otherwise
  /// that line is dropped.
  pub special_line: Option<String>,
}

impl Placeholders {
  /// Maps the year sentinel `0` to "no year".
  pub const fn year_from_sentinel(year: u32) -> Option<u32> {
    if year == 0 { None } else { Some(year) }
  }

  fn special_line(&self) -> Option<&str> {
    self.special_line.as_deref().filter(|line| !line.is_empty())
  }
}

/// A license block selected from a [`TemplateStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseTemplate {
  name: String,
  lines: Vec<String>,
}

impl LicenseTemplate {
  /// The license name this block was selected by.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Raw template lines, tokens included.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// Substitutes placeholders and returns the header lines.
  ///
  /// The first line carries only the `[special_line]` token and is dropped
  /// when no special line is supplied. Every token is replaced in a single
  /// pass, so no token survives and substituted values are not rescanned.
  pub fn apply(&self, placeholders: &Placeholders) -> ResolvedHeader {
    let special_line = placeholders.special_line();
    let year = placeholders.year.map(|year| year.to_string()).unwrap_or_default();
    let holder = placeholders.copyright_holder.as_deref().unwrap_or("");

    let skip = usize::from(special_line.is_none());

    let lines = self
      .lines
      .iter()
      .skip(skip)
      .map(|line| {
        TOKEN_REGEX
          .replace_all(line, |caps: &Captures<'_>| match &caps[0] {
            YEAR_TOKEN => year.as_str(),
            COPYRIGHT_OWNER_TOKEN => holder,
            SPECIAL_LINE_TOKEN => special_line.unwrap_or(""),
            _ => "",
          })
          .into_owned()
      })
      .collect();

    ResolvedHeader { lines }
  }
}

/// Final header text, one entry per line, without comment markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
  lines: Vec<String>,
}

impl ResolvedHeader {
  /// Builds a header directly from lines.
  pub fn from_lines<I, S>(lines: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Prefixes every line with `comment_prefix` and a space, joined by
  /// newlines. No trailing newline is added.
  pub fn commented(&self, comment_prefix: &str) -> String {
    self
      .lines
      .iter()
      .map(|line| format!("{} {}", comment_prefix, line))
      .collect::<Vec<_>>()
      .join("\n")
  }
}

/// Resolves `name` in `store` and renders it with `placeholders`.
///
/// # Errors
///
/// Returns [`IltError::LicenseNotFound`] for an unknown license.
pub fn resolve_header(
  store: &TemplateStore,
  name: &str,
  placeholders: &Placeholders,
) -> Result<ResolvedHeader, IltError> {
  let template = store.resolve_template(name)?;
  verbose_log!("Rendering license '{}'", template.name());
  Ok(template.apply(placeholders))
}
