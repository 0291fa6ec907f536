//! # Report Module
//!
//! This module holds the outcome of an insertion run and can write it as a
//! JSON report.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Which workflow produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertionMode {
  /// Tree-wide insertion driven by the extension table
  Auto,
  /// Insertion into every file with one given extension
  SpecialExtension,
  /// Insertion into one given file
  SpecialFile,
}

impl std::fmt::Display for InsertionMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      InsertionMode::Auto => write!(f, "auto"),
      InsertionMode::SpecialExtension => write!(f, "special (extension)"),
      InsertionMode::SpecialFile => write!(f, "special (file)"),
    }
  }
}

/// A file that could not be modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Error message
  pub error: String,
}

/// Outcome of one insertion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionReport {
  /// Workflow that produced this report
  pub mode: InsertionMode,
  /// Root directory or target file
  #[serde(with = "path_serialization")]
  pub root: PathBuf,
  /// Files that received the header, in processing order
  #[serde(with = "path_list_serialization")]
  pub modified: Vec<PathBuf>,
  /// Distinct extensions with no known comment syntax (auto mode only).
  /// The empty string stands for files without an extension.
  pub unknown_extensions: BTreeSet<String>,
  /// Files that failed while failures were being isolated
  pub failed: Vec<FailedFile>,
}

impl InsertionReport {
  pub const fn new(mode: InsertionMode, root: PathBuf) -> Self {
    Self {
      mode,
      root,
      modified: Vec::new(),
      unknown_extensions: BTreeSet::new(),
      failed: Vec::new(),
    }
  }

  pub fn has_failures(&self) -> bool {
    !self.failed.is_empty()
  }

  /// Writes the report as pretty-printed JSON, stamped with the generation
  /// time.
  pub fn write_json(&self, output_path: &Path) -> Result<()> {
    let report = serde_json::json!({
      "generated_at": Local::now().to_rfc3339(),
      "report": self,
    });

    let content = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;

    fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

mod path_list_serialization {
  use std::path::PathBuf;

  use serde::ser::SerializeSeq;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(paths: &[PathBuf], serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let mut seq = serializer.serialize_seq(Some(paths.len()))?;
    for path in paths {
      seq.serialize_element(&path.to_string_lossy())?;
    }
    seq.end()
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let paths = Vec::<String>::deserialize(deserializer)?;
    Ok(paths.into_iter().map(PathBuf::from).collect())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  fn sample_report() -> InsertionReport {
    let mut report = InsertionReport::new(InsertionMode::Auto, PathBuf::from("/proj"));
    report.modified.push(PathBuf::from("/proj/src/a.py"));
    report.unknown_extensions.insert(".rs".to_string());
    report.failed.push(FailedFile {
      path: PathBuf::from("/proj/locked.c"),
      error: "permission denied".to_string(),
    });
    report
  }

  #[test]
  fn test_report_serializes_paths_as_strings() {
    let value = serde_json::to_value(sample_report()).unwrap();

    assert_eq!(value["mode"], "auto");
    assert_eq!(value["root"], "/proj");
    assert_eq!(value["modified"][0], "/proj/src/a.py");
    assert_eq!(value["unknown_extensions"][0], ".rs");
    assert_eq!(value["failed"][0]["path"], "/proj/locked.c");
  }

  #[test]
  fn test_write_json() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("report.json");

    sample_report().write_json(&output).unwrap();

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert!(written["generated_at"].is_string());

    let report: InsertionReport = serde_json::from_value(written["report"].clone()).unwrap();
    assert_eq!(report, sample_report());
  }

  #[test]
  fn test_has_failures() {
    assert!(sample_report().has_failures());
    assert!(!InsertionReport::new(InsertionMode::SpecialFile, PathBuf::from("a.py")).has_failures());
  }
}
