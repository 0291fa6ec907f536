//! # Output Module
//!
//! This module centralizes all user-facing output for the ilt tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show what was modified and what was skipped
//! - **Scannable**: Use formatting to make output easy to parse visually
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: In quiet mode only the modified paths are printed

use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FailedFile, InsertionReport};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Warning
  pub const WARNING: &str = "!";
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Which optional lists to print after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
  /// Print the modified files
  pub files: bool,
  /// Print the unknown extensions
  pub unknown_extensions: bool,
}

impl Default for ListOptions {
  fn default() -> Self {
    Self {
      files: true,
      unknown_extensions: true,
    }
  }
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Prints the result of a run.
pub fn print_report(report: &InsertionReport, lists: ListOptions) {
  let root = if report.root.is_dir() {
    Some(report.root.as_path())
  } else {
    report.root.parent()
  };

  if report.modified.is_empty() {
    if !is_quiet() {
      println!(
        "{} No matching files were found in {}.",
        symbols::WARNING.if_supports_color(Stream::Stdout, |s| s.yellow()),
        report.root.display()
      );
    }
  } else if lists.files {
    print_modified_files(&report.modified, root);
  } else if !is_quiet() {
    println!(
      "{} Inserted license text into {} {}.",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      report.modified.len(),
      files_word(report.modified.len())
    );
  }

  if lists.unknown_extensions && !report.unknown_extensions.is_empty() {
    print_blank_line();
    print_unknown_extensions(report);
  }

  if report.has_failures() {
    print_blank_line();
    print_failed_files(&report.failed, root);
  }
}

/// Print the list of files that received the header.
///
/// In quiet mode only the paths are printed, one per line.
pub fn print_modified_files(files: &[PathBuf], root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  if is_quiet() {
    for file in files {
      println!("{}", make_relative_path(file, root));
    }
    return;
  }

  let count = files.len();
  println!(
    "{} Inserted license text into {} {}:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    count,
    files_word(count)
  );

  print_limited(files.iter().map(|file| make_relative_path(file, root)), count);
}

/// Print the distinct extensions that had no known comment syntax.
pub fn print_unknown_extensions(report: &InsertionReport) {
  if is_quiet() || report.unknown_extensions.is_empty() {
    return;
  }

  println!(
    "{} Encountered {} unknown {} (files left untouched):",
    symbols::WARNING.if_supports_color(Stream::Stdout, |s| s.yellow()),
    report.unknown_extensions.len(),
    if report.unknown_extensions.len() == 1 {
      "extension"
    } else {
      "extensions"
    }
  );

  for extension in &report.unknown_extensions {
    if extension.is_empty() {
      println!("  {}", "(no extension)".if_supports_color(Stream::Stdout, |s| s.dimmed()));
    } else {
      println!("  {}", extension);
    }
  }
}

/// Print the files that failed while failures were being isolated.
///
/// Failures go to stderr, even in quiet mode.
pub fn print_failed_files(failed: &[FailedFile], root: Option<&Path>) {
  if failed.is_empty() {
    return;
  }

  eprintln!(
    "{} Failed to insert license text into {} {}:",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    failed.len(),
    files_word(failed.len())
  );

  for file in failed {
    eprintln!("  {}: {}", make_relative_path(&file.path, root), file.error);
  }
}

/// Print a list of items, one per line.
pub fn print_items<I, S>(items: I)
where
  I: IntoIterator<Item = S>,
  S: std::fmt::Display,
{
  for item in items {
    println!("{}", item);
  }
}

/// Print an error line to stderr.
pub fn print_error(message: &str) {
  eprintln!("{} {}", "ERROR:".if_supports_color(Stream::Stderr, |s| s.red()), message);
}

fn print_limited(lines: impl Iterator<Item = String>, count: usize) {
  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for line in lines.take(limit) {
    println!("  {}", line);
  }

  if !show_all && count > limit {
    let remaining = count - limit;
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      remaining
    );
  }
}

const fn files_word(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Make a path relative to the root for display.
fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  match root.and_then(|root| pathdiff::diff_paths(path, root)) {
    Some(relative) if !relative.as_os_str().is_empty() && !relative.starts_with("..") => {
      relative.to_string_lossy().to_string()
    }
    _ => path.to_string_lossy().to_string(),
  }
}
