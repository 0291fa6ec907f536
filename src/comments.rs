//! # Comments Module
//!
//! Maps file extensions to the line-comment prefix used when inserting a
//! header. The table is fixed; an extension outside it is reported as unknown
//! and never guessed.

use std::path::Path;

/// Returns the line-comment prefix for `extension` (leading dot included),
/// or `None` when the extension is not in the table.
///
/// Matching is exact and case-sensitive.
///
/// # Supported File Types
///
/// - C/C++/C#/Delphi/Go/Java/JavaScript/PHP/Swift/TypeScript: `//`
/// - Fortran: `!`
/// - Python/Ruby: `#`
/// - Visual Basic: `'`
pub fn comment_for(extension: &str) -> Option<&'static str> {
  match extension {
    ".c" | ".cc" | ".cpp" | ".cxx" | ".cs" | ".dpr" | ".drc" | ".go" | ".java" | ".js" | ".php" | ".swift" | ".ts" => {
      Some("//")
    }
    ".f" | ".for" | ".f90" => Some("!"),
    ".py" | ".pyc" | ".pyi" | ".rb" => Some("#"),
    ".vb" => Some("'"),
    _ => None,
  }
}

/// Returns the extension of `path` with its leading dot, or an empty string
/// when the file has none. Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(path: &Path) -> String {
  path
    .extension()
    .map(|ext| format!(".{}", ext.to_string_lossy()))
    .unwrap_or_default()
}

/// Normalizes a user-supplied extension to carry exactly one leading dot.
/// An empty input stays empty.
pub fn normalize_extension(extension: &str) -> String {
  let trimmed = extension.trim().trim_start_matches('.');
  if trimmed.is_empty() {
    String::new()
  } else {
    format!(".{}", trimmed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_comment_for_known_extensions() {
    assert_eq!(comment_for(".py"), Some("#"));
    assert_eq!(comment_for(".rb"), Some("#"));
    assert_eq!(comment_for(".java"), Some("//"));
    assert_eq!(comment_for(".ts"), Some("//"));
    assert_eq!(comment_for(".f90"), Some("!"));
    assert_eq!(comment_for(".vb"), Some("'"));
  }

  #[test]
  fn test_comment_for_unknown_extensions() {
    assert_eq!(comment_for(".rs"), None);
    assert_eq!(comment_for(".PY"), None);
    assert_eq!(comment_for(""), None);
    assert_eq!(comment_for("py"), None);
  }

  #[test]
  fn test_extension_of() {
    assert_eq!(extension_of(Path::new("src/main.py")), ".py");
    assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
    assert_eq!(extension_of(Path::new("Makefile")), "");
    assert_eq!(extension_of(Path::new(".bashrc")), "");
  }

  #[test]
  fn test_normalize_extension() {
    assert_eq!(normalize_extension("js"), ".js");
    assert_eq!(normalize_extension(".js"), ".js");
    assert_eq!(normalize_extension(" ..js "), ".js");
    assert_eq!(normalize_extension(""), "");
  }
}
