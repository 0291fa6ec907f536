#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ilt::templates::{Placeholders, ResolvedHeader, TemplateStore, resolve_header};

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Reads `root/relative` as UTF-8.
pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  let path = root.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Creates a small mixed-language project:
///
/// ```text
/// src/main.py
/// src/app.js
/// src/notes.txt
/// vendor/lib.py
/// README
/// ```
pub fn create_project(root: &Path) -> Result<()> {
  write_file(root, "src/main.py", "print('hello')\n")?;
  write_file(root, "src/app.js", "console.log('hello');\n")?;
  write_file(root, "src/notes.txt", "notes\n")?;
  write_file(root, "vendor/lib.py", "import os\n")?;
  write_file(root, "README", "readme\n")?;
  Ok(())
}

/// The bundled MIT header for Jane Doe in 2023.
pub fn mit_header() -> Result<ResolvedHeader> {
  let placeholders = Placeholders {
    year: Some(2023),
    copyright_holder: Some("Jane Doe".to_string()),
    special_line: None,
  };
  Ok(resolve_header(&TemplateStore::bundled(), "mit", &placeholders)?)
}
