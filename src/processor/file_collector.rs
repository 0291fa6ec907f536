//! # File Collector Module
//!
//! This module walks a root directory and collects the candidate files for
//! insertion, applying directory exclusions on the way.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::IltError;
use crate::file_filter::{DirectoryFilter, ExclusionRules, FileFilter, to_native_separators};

/// Recursively lists the files under `root`.
///
/// Files whose full path contains an ignored directory token are left out.
/// Extension exclusions are not applied here; the caller decides how they
/// apply. Symlinked files are included, symlinked directories are not
/// followed. The order is traversal order.
///
/// # Errors
///
/// Returns [`IltError::InvalidPath`] if `root` is not a directory. Nothing
/// is listed in that case.
pub fn list_files(root: &Path, exclusions: &ExclusionRules) -> Result<Vec<PathBuf>, IltError> {
  let root = native_root(root);
  if !root.is_dir() {
    return Err(IltError::InvalidPath(root));
  }

  debug!("Scanning directory: {}", root.display());
  let start_time = std::time::Instant::now();

  let filter = exclusions.directory_filter();
  let mut files = Vec::new();

  for entry in walk_entries(&root, &filter) {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        warn!("Error reading directory entry: {}", e);
        continue;
      }
    };

    let file_type = entry.file_type();
    if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
      files.push(entry.into_path());
    }
  }

  debug!(
    "Found {} files in {}ms",
    files.len(),
    start_time.elapsed().as_millis()
  );

  Ok(files)
}

/// Walks `root`, pruning every entry the directory filter rejects.
///
/// A rejected directory is never read. Every path below it contains the
/// same token, so pruning keeps the substring semantics of the filter.
fn walk_entries<'a>(
  root: &Path,
  filter: &'a DirectoryFilter<'a>,
) -> impl Iterator<Item = walkdir::Result<DirEntry>> + 'a {
  WalkDir::new(root)
    .into_iter()
    .filter_entry(move |entry| filter.should_process(entry.path()).should_process)
}

/// Converts a potentially relative path to an absolute path.
pub fn absolutize_path(path: &Path) -> anyhow::Result<PathBuf> {
  if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    Ok(current_dir.join(path))
  }
}

/// Native separators, made absolute when the current directory is known.
pub fn native_root(path: &Path) -> PathBuf {
  let native = PathBuf::from(to_native_separators(&path.to_string_lossy()));
  absolutize_path(&native).unwrap_or(native)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn sorted(mut files: Vec<PathBuf>) -> Vec<PathBuf> {
    files.sort();
    files
  }

  #[test]
  fn test_list_files_recurses() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src/nested")).unwrap();
    fs::write(root.join("top.py"), "").unwrap();
    fs::write(root.join("src/a.c"), "").unwrap();
    fs::write(root.join("src/nested/b.go"), "").unwrap();

    let files = sorted(list_files(root, &ExclusionRules::default()).unwrap());

    assert_eq!(
      files,
      vec![root.join("src/a.c"), root.join("src/nested/b.go"), root.join("top.py")]
    );
  }

  #[test]
  fn test_list_files_excludes_directories() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("vendor/deep")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("vendor/a.py"), "").unwrap();
    fs::write(root.join("vendor/deep/c.py"), "").unwrap();
    fs::write(root.join("src/b.py"), "").unwrap();

    let rules = ExclusionRules::new(Vec::<String>::new(), ["vendor"]);
    let files = list_files(root, &rules).unwrap();

    assert_eq!(files, vec![root.join("src/b.py")]);
  }

  #[test]
  fn test_ignored_directories_are_not_descended() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("vendor/deep/deeper")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("vendor/deep/deeper/x.py"), "").unwrap();
    fs::write(root.join("src/b.py"), "").unwrap();

    let rules = ExclusionRules::new(Vec::<String>::new(), ["vendor"]);
    let filter = rules.directory_filter();
    let visited: Vec<PathBuf> = walk_entries(root, &filter)
      .map(|entry| entry.unwrap().into_path())
      .collect();

    assert!(visited.contains(&root.join("src/b.py")));
    assert!(!visited.iter().any(|path| path.starts_with(root.join("vendor"))));
  }

  #[test]
  fn test_list_files_keeps_ignored_extensions() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.js"), "").unwrap();

    let rules = ExclusionRules::new(["js"], Vec::<String>::new());
    let files = list_files(root, &rules).unwrap();

    assert_eq!(files, vec![root.join("a.js")]);
  }

  #[test]
  fn test_list_files_rejects_missing_root() {
    let err = list_files(Path::new("/does/not/exist"), &ExclusionRules::default()).unwrap_err();
    assert!(matches!(err, IltError::InvalidPath(_)));
  }

  #[test]
  fn test_list_files_rejects_file_root() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("single.py");
    fs::write(&file, "").unwrap();

    let err = list_files(&file, &ExclusionRules::default()).unwrap_err();
    assert!(matches!(err, IltError::InvalidPath(path) if path == file));
  }

  #[test]
  fn test_absolutize_path_already_absolute() {
    let path = PathBuf::from("/absolute/path");
    let result = absolutize_path(&path).unwrap();
    assert_eq!(result, path);
  }
}
