//! # ilt
//!
//! Insert license text into source files.

use std::process::ExitCode;

use ilt::cli::{Cli, RunStatus, run};
use ilt::output::print_error;

fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run(cli) {
    Ok(RunStatus::Success) => ExitCode::SUCCESS,
    Ok(RunStatus::Failed) => ExitCode::FAILURE,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
