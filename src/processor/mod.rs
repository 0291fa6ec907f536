//! # Processor Module
//!
//! This module contains the insertion workflows. Each workflow is a single
//! synchronous pipeline: enumerate targets, resolve the comment syntax (auto
//! mode only), insert the header, aggregate the results.
//!
//! The module is organized into several submodules:
//! - [`file_collector`] - Directory traversal with directory exclusions
//! - [`file_io`] - In-place header insertion
//!
//! The [`Processor`] struct is the main entry point, holding the rendered
//! header and exclusion rules for one invocation.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

pub use file_collector::{absolutize_path, list_files, native_root};
pub use file_io::insert_header;
use tracing::{debug, info, warn};

use crate::comments::{comment_for, extension_of, normalize_extension};
use crate::error::IltError;
use crate::file_filter::{ExclusionRules, FileFilter};
use crate::report::{FailedFile, InsertionMode, InsertionReport};
use crate::templates::ResolvedHeader;
use crate::verbose_log;

/// What to do when a single file cannot be modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Stop the run and return the error. Files already modified stay
  /// modified.
  #[default]
  Abort,
  /// Record the failure in [`InsertionReport::failed`] and move on.
  Continue,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub header: ResolvedHeader,
  pub exclusions: ExclusionRules,
  pub failure_policy: FailurePolicy,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with no exclusions that aborts on the
  /// first failed file.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     failure_policy: FailurePolicy::Continue,
  ///     ..ProcessorConfig::new(header)
  /// }
  /// ```
  pub fn new(header: ResolvedHeader) -> Self {
    Self {
      header,
      exclusions: ExclusionRules::default(),
      failure_policy: FailurePolicy::Abort,
    }
  }
}

/// Runs the insertion workflows with one rendered header.
///
/// The header is resolved by the caller before the processor exists, so an
/// unknown license never reaches the file system.
pub struct Processor {
  header: ResolvedHeader,
  exclusions: ExclusionRules,
  failure_policy: FailurePolicy,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      header: config.header,
      exclusions: config.exclusions,
      failure_policy: config.failure_policy,
    }
  }

  pub const fn header(&self) -> &ResolvedHeader {
    &self.header
  }

  /// Bulk mode: inserts the header into every file under `root` whose
  /// extension has a known comment syntax.
  ///
  /// Ignored directories are dropped while walking; ignored extensions are
  /// skipped before the comment lookup. Files with an unmapped extension are
  /// not touched and their extension is added to
  /// [`InsertionReport::unknown_extensions`].
  ///
  /// # Errors
  ///
  /// Returns [`IltError::InvalidPath`] before touching any file if `root` is
  /// not a directory. With [`FailurePolicy::Abort`], the first
  /// [`IltError::FileAccess`] stops the run.
  pub fn auto_insert(&self, root: &Path) -> Result<InsertionReport, IltError> {
    let files = list_files(root, &self.exclusions)?;
    let mut report = InsertionReport::new(InsertionMode::Auto, native_root(root));
    let extension_filter = self.exclusions.extension_filter();

    info!("Auto insertion over {} candidate files", files.len());

    for file in files {
      if !extension_filter.should_process(&file).should_process {
        continue;
      }

      let extension = extension_of(&file);
      match comment_for(&extension) {
        Some(comment) => self.insert_one(&file, comment, &mut report)?,
        None => {
          verbose_log!("Skipping: {} (unknown extension '{}')", file.display(), extension);
          report.unknown_extensions.insert(extension);
        }
      }
    }

    Ok(report)
  }

  /// Targeted-by-extension mode: inserts the header into every file under
  /// `root` with exactly `extension`, using `comment` as the prefix.
  ///
  /// The comment table is bypassed, so any extension is accepted. Only
  /// directory exclusions apply.
  ///
  /// # Errors
  ///
  /// Same as [`auto_insert`](Self::auto_insert).
  pub fn special_ext_insert(&self, root: &Path, extension: &str, comment: &str) -> Result<InsertionReport, IltError> {
    let extension = normalize_extension(extension);
    let files = list_files(root, &self.exclusions.directories_only())?;
    let mut report = InsertionReport::new(InsertionMode::SpecialExtension, native_root(root));

    info!("Inserting into '{}' files under {}", extension, report.root.display());

    for file in files {
      if extension_of(&file) == extension {
        self.insert_one(&file, comment, &mut report)?;
      }
    }

    Ok(report)
  }

  /// Targeted-single-file mode: inserts the header into `path` with
  /// `comment` as the prefix.
  ///
  /// Returns `true` on success. A failed write is returned as the error,
  /// never as `false`, whatever the failure policy.
  pub fn special_file_insert(&self, path: &Path, comment: &str) -> Result<bool, IltError> {
    let path = native_root(path);
    insert_header(&self.header, &path, comment)?;
    debug!("Inserted header into {}", path.display());
    Ok(true)
  }

  /// Single-file mode wrapped in a report, for uniform output.
  pub fn special_file_report(&self, path: &Path, comment: &str) -> Result<InsertionReport, IltError> {
    let mut report = InsertionReport::new(InsertionMode::SpecialFile, native_root(path));
    if self.special_file_insert(path, comment)? {
      report.modified.push(report.root.clone());
    }
    Ok(report)
  }

  fn insert_one(&self, file: &Path, comment: &str, report: &mut InsertionReport) -> Result<(), IltError> {
    match insert_header(&self.header, file, comment) {
      Ok(()) => {
        debug!("Inserted header into {}", file.display());
        report.modified.push(file.to_path_buf());
        Ok(())
      }
      Err(e) if self.failure_policy == FailurePolicy::Continue && e.is_file_scoped() => {
        warn!("{}", e);
        report.failed.push(FailedFile {
          path: PathBuf::from(file),
          error: e.to_string(),
        });
        Ok(())
      }
      Err(e) => Err(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn processor() -> Processor {
    Processor::new(ProcessorConfig::new(ResolvedHeader::from_lines(["H"])))
  }

  #[test]
  fn test_auto_insert_routes_unknown_extensions() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.py"), "A").unwrap();
    fs::write(root.join("b.rs"), "B").unwrap();
    fs::write(root.join("c.rs"), "C").unwrap();

    let report = processor().auto_insert(root).unwrap();

    assert_eq!(report.modified, vec![root.join("a.py")]);
    assert_eq!(report.unknown_extensions.iter().collect::<Vec<_>>(), vec![".rs"]);
    assert_eq!(fs::read_to_string(root.join("a.py")).unwrap(), "# H\n\nA");
    assert_eq!(fs::read_to_string(root.join("b.rs")).unwrap(), "B");
  }

  #[test]
  fn test_auto_insert_skips_ignored_extensions_before_lookup() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.js"), "A").unwrap();
    fs::write(root.join("b.rs"), "B").unwrap();

    let processor = Processor::new(ProcessorConfig {
      exclusions: ExclusionRules::new([".js", ".rs"], Vec::<String>::new()),
      ..ProcessorConfig::new(ResolvedHeader::from_lines(["H"]))
    });
    let report = processor.auto_insert(root).unwrap();

    assert!(report.modified.is_empty());
    assert!(report.unknown_extensions.is_empty());
    assert_eq!(fs::read_to_string(root.join("a.js")).unwrap(), "A");
  }

  #[test]
  fn test_special_ext_insert_uses_given_comment() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.rs"), "A").unwrap();
    fs::write(root.join("b.py"), "B").unwrap();

    let report = processor().special_ext_insert(root, "rs", "//").unwrap();

    assert_eq!(report.mode, InsertionMode::SpecialExtension);
    assert_eq!(report.modified, vec![root.join("a.rs")]);
    assert_eq!(fs::read_to_string(root.join("a.rs")).unwrap(), "// H\n\nA");
    assert_eq!(fs::read_to_string(root.join("b.py")).unwrap(), "B");
  }

  #[test]
  fn test_special_file_insert_returns_true() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("notes.txt");
    fs::write(&file, "N").unwrap();

    assert!(processor().special_file_insert(&file, ";").unwrap());
    assert_eq!(fs::read_to_string(&file).unwrap(), "; H\n\nN");
  }

  #[test]
  fn test_special_file_insert_missing_file_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("missing.txt");

    let err = processor().special_file_insert(&file, "#").unwrap_err();
    assert!(matches!(err, IltError::FileAccess { .. }));
  }

  #[test]
  fn test_abort_policy_propagates_file_errors() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("gone.py");
    let mut report = InsertionReport::new(InsertionMode::Auto, temp_dir.path().to_path_buf());

    let err = processor().insert_one(&missing, "#", &mut report).unwrap_err();

    assert!(matches!(err, IltError::FileAccess { ref path, .. } if *path == missing));
    assert!(report.modified.is_empty());
    assert!(report.failed.is_empty());
  }

  #[test]
  fn test_continue_policy_records_file_errors() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("gone.py");
    let present = temp_dir.path().join("here.py");
    fs::write(&present, "P").unwrap();

    let processor = Processor::new(ProcessorConfig {
      failure_policy: FailurePolicy::Continue,
      ..ProcessorConfig::new(ResolvedHeader::from_lines(["H"]))
    });
    let mut report = InsertionReport::new(InsertionMode::Auto, temp_dir.path().to_path_buf());

    processor.insert_one(&missing, "#", &mut report).unwrap();
    processor.insert_one(&present, "#", &mut report).unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, missing);
    assert!(report.failed[0].error.contains("gone.py"));
    assert_eq!(report.modified, vec![present.clone()]);
    assert!(report.has_failures());
    assert_eq!(fs::read_to_string(&present).unwrap(), "# H\n\nP");
  }

  #[test]
  fn test_invalid_root_touches_nothing() {
    let err = processor().auto_insert(Path::new("/does/not/exist")).unwrap_err();
    assert!(matches!(err, IltError::InvalidPath(_)));
  }
}
