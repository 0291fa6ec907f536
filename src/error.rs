//! # Error Module
//!
//! Errors produced by the insertion engine. Resolution errors
//! ([`IltError::LicenseNotFound`], [`IltError::InvalidPath`],
//! [`IltError::TemplateSource`]) are raised before any file is modified;
//! [`IltError::FileAccess`] is scoped to a single target file.

use std::path::PathBuf;

/// Error type for license resolution and file insertion.
#[derive(Debug, thiserror::Error)]
pub enum IltError {
  /// The requested license name has no block in the template resource.
  #[error("There is no license with the \"{0}\" name")]
  LicenseNotFound(String),

  /// The traversal root is not a directory.
  #[error("Invalid path: {} is not a directory", .0.display())]
  InvalidPath(PathBuf),

  /// Reading or writing a target file failed.
  #[error("Failed file access: {}: {source}", path.display())]
  FileAccess { path: PathBuf, source: std::io::Error },

  /// A custom template resource could not be read.
  #[error("Failed to read license texts '{}': {source}", path.display())]
  TemplateSource { path: PathBuf, source: std::io::Error },
}

impl IltError {
  /// Whether this error is tied to one target file rather than the whole
  /// invocation.
  pub const fn is_file_scoped(&self) -> bool {
    matches!(self, Self::FileAccess { .. })
  }
}
