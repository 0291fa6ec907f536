//! # File Filter Module
//!
//! This module contains the exclusion rules applied while collecting target
//! files: ignored directories (matched by substring anywhere in a file's full
//! path) and ignored extensions.

use std::collections::BTreeSet;
use std::path::{MAIN_SEPARATOR, Path};

use crate::comments::{extension_of, normalize_extension};
use crate::verbose_log;

/// Result of a file filtering operation.
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// User-supplied exclusions. Both sets are empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRules {
  /// Extensions with a leading dot, e.g. `.js`.
  pub ignored_extensions: BTreeSet<String>,
  /// Tokens matched as substrings of a file's full path.
  pub ignored_directories: BTreeSet<String>,
}

impl ExclusionRules {
  /// Builds rules from raw user input. Extensions are normalized to carry a
  /// leading dot and directory tokens to native path separators; empty
  /// entries are dropped.
  pub fn new<E, D>(ignored_extensions: E, ignored_directories: D) -> Self
  where
    E: IntoIterator,
    E::Item: AsRef<str>,
    D: IntoIterator,
    D::Item: AsRef<str>,
  {
    let ignored_extensions = ignored_extensions
      .into_iter()
      .map(|ext| normalize_extension(ext.as_ref()))
      .filter(|ext| !ext.is_empty())
      .collect();

    let ignored_directories = ignored_directories
      .into_iter()
      .map(|dir| to_native_separators(dir.as_ref().trim()))
      .filter(|dir| !dir.is_empty())
      .collect();

    Self {
      ignored_extensions,
      ignored_directories,
    }
  }

  /// Same rules without the extension exclusions.
  pub fn directories_only(&self) -> Self {
    Self {
      ignored_extensions: BTreeSet::new(),
      ignored_directories: self.ignored_directories.clone(),
    }
  }

  pub fn directory_filter(&self) -> DirectoryFilter<'_> {
    DirectoryFilter { rules: self }
  }

  pub fn extension_filter(&self) -> ExtensionFilter<'_> {
    ExtensionFilter { rules: self }
  }
}

/// Skips files whose full path contains an ignored directory token.
///
/// This is plain substring containment, not path-segment matching: an ignored
/// `lib` also skips `/proj/liberty.txt`.
pub struct DirectoryFilter<'a> {
  rules: &'a ExclusionRules,
}

impl FileFilter for DirectoryFilter<'_> {
  fn should_process(&self, path: &Path) -> FilterResult {
    let full_path = to_native_separators(&path.to_string_lossy());

    match self
      .rules
      .ignored_directories
      .iter()
      .find(|token| full_path.contains(token.as_str()))
    {
      Some(token) => {
        verbose_log!("Skipping: {} (inside ignored directory '{}')", path.display(), token);
        FilterResult::skip(format!("Inside ignored directory '{}'", token))
      }
      None => FilterResult::process(),
    }
  }
}

/// Skips files whose extension is ignored.
pub struct ExtensionFilter<'a> {
  rules: &'a ExclusionRules,
}

impl FileFilter for ExtensionFilter<'_> {
  fn should_process(&self, path: &Path) -> FilterResult {
    let extension = extension_of(path);
    if !extension.is_empty() && self.rules.ignored_extensions.contains(&extension) {
      verbose_log!("Skipping: {} (ignored extension {})", path.display(), extension);
      FilterResult::skip(format!("Ignored extension {}", extension))
    } else {
      FilterResult::process()
    }
  }
}

/// Rewrites both `/` and `\` to the host separator.
pub fn to_native_separators(path: &str) -> String {
  path
    .chars()
    .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  fn native(path: &str) -> PathBuf {
    PathBuf::from(to_native_separators(path))
  }

  #[test]
  fn test_new_normalizes_input() {
    let rules = ExclusionRules::new([".js", "c", " "], ["vendor", "build/out", ""]);

    assert!(rules.ignored_extensions.contains(".js"));
    assert!(rules.ignored_extensions.contains(".c"));
    assert_eq!(rules.ignored_extensions.len(), 2);

    assert!(rules.ignored_directories.contains("vendor"));
    assert!(rules.ignored_directories.contains(&to_native_separators("build/out")));
    assert_eq!(rules.ignored_directories.len(), 2);
  }

  #[test]
  fn test_directory_filter_matches_substring() {
    let rules = ExclusionRules::new(Vec::<String>::new(), ["vendor"]);
    let filter = rules.directory_filter();

    assert!(!filter.should_process(&native("/proj/vendor/a.py")).should_process);
    assert!(!filter.should_process(&native("/proj/vendor/deep/b.py")).should_process);
    assert!(filter.should_process(&native("/proj/src/b.py")).should_process);
  }

  #[test]
  fn test_directory_filter_is_not_segment_aware() {
    let rules = ExclusionRules::new(Vec::<String>::new(), ["lib"]);
    let result = rules.directory_filter().should_process(&native("/proj/liberty.txt"));

    assert!(!result.should_process);
    assert!(result.reason.is_some());
  }

  #[test]
  fn test_directory_filter_with_nested_token() {
    let rules = ExclusionRules::new(Vec::<String>::new(), ["build/out"]);
    let filter = rules.directory_filter();

    assert!(!filter.should_process(&native("/proj/build/out/a.c")).should_process);
    assert!(filter.should_process(&native("/proj/build/a.c")).should_process);
  }

  #[test]
  fn test_extension_filter() {
    let rules = ExclusionRules::new(["js"], Vec::<String>::new());
    let filter = rules.extension_filter();

    assert!(!filter.should_process(Path::new("app.js")).should_process);
    assert!(filter.should_process(Path::new("app.ts")).should_process);
    assert!(filter.should_process(Path::new("Makefile")).should_process);
  }

  #[test]
  fn test_directories_only_drops_extensions() {
    let rules = ExclusionRules::new(["js"], ["vendor"]);
    let dirs = rules.directories_only();

    assert!(dirs.ignored_extensions.is_empty());
    assert_eq!(dirs.ignored_directories, rules.ignored_directories);
  }
}
