//! # Insert Commands
//!
//! This module implements the `auto` and `special` commands. Both resolve the
//! license header first, so an unknown license or unreadable license texts
//! stop the command before any file is touched.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use super::GlobalArgs;
use crate::file_filter::ExclusionRules;
use crate::info_log;
use crate::output::{ListOptions, print_report};
use crate::processor::{FailurePolicy, Processor, ProcessorConfig};
use crate::report::InsertionReport;
use crate::templates::{Placeholders, ResolvedHeader, resolve_header};

/// Overall outcome of a command that completed without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
  /// Everything requested was done
  Success,
  /// Some files could not be modified (only with `--keep-going`)
  Failed,
}

impl RunStatus {
  pub fn from_report(report: &InsertionReport) -> Self {
    if report.has_failures() {
      Self::Failed
    } else {
      Self::Success
    }
  }
}

/// Values substituted into the license text
#[derive(Args, Debug, Clone, Default)]
pub struct PlaceholderArgs {
  /// Copyright year; 0 leaves the year out [default: current year]
  #[arg(long, short = 'y', value_name = "YEAR")]
  pub year: Option<u32>,

  /// Copyright holder name
  #[arg(long, short = 'H', alias = "copyright-holder", value_name = "NAME")]
  pub holder: Option<String>,

  /// Line placed above the license text; omitted when empty
  #[arg(long, short = 's', value_name = "TEXT")]
  pub special_line: Option<String>,
}

impl PlaceholderArgs {
  pub fn to_placeholders(&self) -> Placeholders {
    let year = match self.year {
      Some(year) => Placeholders::year_from_sentinel(year),
      None => u32::try_from(chrono::Local::now().year()).ok(),
    };

    Placeholders {
      year,
      copyright_holder: self.holder.clone(),
      special_line: self.special_line.clone(),
    }
  }
}

/// Arguments for the auto command
#[derive(Args, Debug, Clone)]
pub struct AutoArgs {
  /// License name (see `ilt licenses`)
  pub license: String,

  /// Root folder to process recursively
  pub path: PathBuf,

  #[command(flatten)]
  pub placeholders: PlaceholderArgs,

  /// Extensions to leave untouched (repeatable; also accepts a space or
  /// comma separated list such as ".js .c")
  #[arg(long, value_name = "EXT")]
  pub ignore_ext: Vec<String>,

  /// Skip every file whose path contains this text (repeatable)
  #[arg(long, value_name = "DIR")]
  pub ignore_dir: Vec<String>,

  /// Keep going when a file cannot be modified and report it at the end
  #[arg(long, short = 'k')]
  pub keep_going: bool,

  /// Do not list the modified files
  #[arg(long, short = 'f')]
  pub no_files_list: bool,

  /// Do not list unknown extensions
  #[arg(long, short = 'e')]
  pub no_unknown_list: bool,

  /// Write a JSON report of the run to this path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

/// Arguments for the special command
#[derive(Args, Debug, Clone)]
pub struct SpecialArgs {
  /// License name (see `ilt licenses`)
  pub license: String,

  /// Target file, or root folder when --ext is given
  pub path: PathBuf,

  /// Comment syntax placed before every license line, e.g. "//" or "#"
  #[arg(long, short = 'c', value_name = "COMMENT")]
  pub comment: String,

  /// Insert into every file with this extension under PATH
  #[arg(long, value_name = "EXT")]
  pub ext: Option<String>,

  #[command(flatten)]
  pub placeholders: PlaceholderArgs,

  /// Skip every file whose path contains this text (repeatable)
  #[arg(long, value_name = "DIR", requires = "ext")]
  pub ignore_dir: Vec<String>,

  /// Keep going when a file cannot be modified and report it at the end
  #[arg(long, short = 'k', requires = "ext")]
  pub keep_going: bool,

  /// Do not list the modified files
  #[arg(long, short = 'f')]
  pub no_files_list: bool,

  /// Write a JSON report of the run to this path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

/// Run the auto command with the given arguments
pub fn run_auto(args: AutoArgs, global: &GlobalArgs) -> Result<RunStatus> {
  let header = resolve(&args.license, &args.placeholders, global)?;

  let processor = Processor::new(ProcessorConfig {
    exclusions: ExclusionRules::new(split_list(&args.ignore_ext), split_list(&args.ignore_dir)),
    failure_policy: failure_policy(args.keep_going),
    ..ProcessorConfig::new(header)
  });

  info_log!("Inserting '{}' license into {}...", args.license, args.path.display());

  let start_time = Instant::now();
  let report = processor.auto_insert(&args.path)?;
  debug!("Auto insertion finished in {}ms", start_time.elapsed().as_millis());

  finish(
    &report,
    ListOptions {
      files: !args.no_files_list,
      unknown_extensions: !args.no_unknown_list,
    },
    args.report_json.as_ref(),
  )
}

/// Run the special command with the given arguments
pub fn run_special(args: SpecialArgs, global: &GlobalArgs) -> Result<RunStatus> {
  let header = resolve(&args.license, &args.placeholders, global)?;

  let processor = Processor::new(ProcessorConfig {
    exclusions: ExclusionRules::new(Vec::<String>::new(), split_list(&args.ignore_dir)),
    failure_policy: failure_policy(args.keep_going),
    ..ProcessorConfig::new(header)
  });

  let lists = ListOptions {
    files: !args.no_files_list,
    unknown_extensions: false,
  };

  let report = match &args.ext {
    Some(ext) => {
      info_log!(
        "Inserting '{}' license into '{}' files under {}...",
        args.license,
        ext,
        args.path.display()
      );
      processor.special_ext_insert(&args.path, ext, &args.comment)?
    }
    None => processor.special_file_report(&args.path, &args.comment)?,
  };

  finish(&report, lists, args.report_json.as_ref())
}

fn resolve(license: &str, placeholders: &PlaceholderArgs, global: &GlobalArgs) -> Result<ResolvedHeader> {
  let store = global.template_store()?;
  let header = resolve_header(&store, license, &placeholders.to_placeholders())?;
  debug!("Resolved '{}' into {} header lines", license, header.lines().len());
  Ok(header)
}

fn finish(report: &InsertionReport, lists: ListOptions, report_json: Option<&PathBuf>) -> Result<RunStatus> {
  print_report(report, lists);

  if let Some(output_path) = report_json {
    report.write_json(output_path)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  Ok(RunStatus::from_report(report))
}

const fn failure_policy(keep_going: bool) -> FailurePolicy {
  if keep_going {
    FailurePolicy::Continue
  } else {
    FailurePolicy::Abort
  }
}

/// Splits every value on whitespace and commas.
fn split_list(values: &[String]) -> Vec<String> {
  values
    .iter()
    .flat_map(|value| value.split(|c: char| c.is_whitespace() || c == ','))
    .filter(|item| !item.is_empty())
    .map(str::to_string)
    .collect()
}
