//! # ilt
//!
//! Insert license text into source files.
//!
//! `ilt` prepends a license header, rendered from a named template and
//! commented with the syntax of each file's language, to every matching file
//! under a directory, to every file with one extension, or to a single file.
//! Files are modified in place and their original bytes are kept after the
//! header.
//!
//! ## Features
//!
//! * Ten bundled license templates with `[year]`, `[copyright_owner]` and
//!   `[special_line]` placeholders
//! * A fixed extension-to-comment table for automatic mode
//! * Explicit comment syntax for files the table does not know
//! * Directory and extension exclusions
//! * An interactive shell accepting the same commands as the command line
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use ilt::processor::{Processor, ProcessorConfig};
//! use ilt::templates::{Placeholders, TemplateStore, resolve_header};
//!
//! fn main() -> Result<(), ilt::IltError> {
//!     let placeholders = Placeholders {
//!         year: Some(2023),
//!         copyright_holder: Some("Jane Doe".to_string()),
//!         special_line: None,
//!     };
//!
//!     // Resolve the header before touching any file
//!     let header = resolve_header(&TemplateStore::bundled(), "mit", &placeholders)?;
//!
//!     let processor = Processor::new(ProcessorConfig::new(header));
//!     let report = processor.auto_insert(Path::new("src"))?;
//!
//!     println!("Modified {} files", report.modified.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`templates`] - License templates and placeholder substitution
//! * [`comments`] - Extension to comment syntax mapping
//! * [`processor`] - Directory traversal and in-place insertion
//! * [`report`] - Results of a run
//! * [`cli`] - Command line and interactive shell

pub mod cli;
pub mod comments;
pub mod error;
pub mod file_filter;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;

pub use error::IltError;
