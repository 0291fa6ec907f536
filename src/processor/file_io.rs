//! # File I/O Module
//!
//! This module prepends a commented header to a file in place.

use std::fs::OpenOptions;
use std::io::{Read as _, Seek as _, SeekFrom, Write as _};
use std::path::Path;

use tracing::trace;

use crate::error::IltError;
use crate::templates::ResolvedHeader;

/// Prepends `header` to the file at `path`.
///
/// Every header line is written as `comment_prefix + " " + line`. The file
/// becomes: header block, a newline, a blank line, then the original bytes
/// unchanged. The file is rewritten from its start through the same handle;
/// there is no temporary file and no backup.
///
/// # Errors
///
/// Returns [`IltError::FileAccess`] carrying `path` if the file cannot be
/// opened, read or written.
pub fn insert_header(header: &ResolvedHeader, path: &Path, comment_prefix: &str) -> Result<(), IltError> {
  let access_error = |source| IltError::FileAccess {
    path: path.to_path_buf(),
    source,
  };

  let mut file = OpenOptions::new()
    .read(true)
    .write(true)
    .open(path)
    .map_err(access_error)?;

  let mut original = Vec::new();
  file.read_to_end(&mut original).map_err(access_error)?;

  let block = header.commented(comment_prefix);
  let mut content = Vec::with_capacity(block.len() + 2 + original.len());
  content.extend_from_slice(block.as_bytes());
  content.extend_from_slice(b"\n\n");
  content.extend_from_slice(&original);

  file.seek(SeekFrom::Start(0)).map_err(access_error)?;
  file.write_all(&content).map_err(access_error)?;
  file.flush().map_err(access_error)?;

  trace!("Wrote {} header bytes to {}", block.len(), path.display());

  Ok(())
}
