//! # Shell Module
//!
//! A line-oriented interactive shell. Every line is parsed with the same
//! clap definition as the command line, so `auto lgpl ./code --year 2023`
//! at the prompt behaves exactly like `ilt auto lgpl ./code --year 2023`.

use std::io::{BufRead, Write};
use std::sync::LazyLock;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use regex::Regex;
use tracing::debug;

use super::{Cli, Command, GlobalArgs, RunStatus, execute};
use crate::logging::is_quiet;
use crate::output::print_error;

/// Matches a double-quoted argument (possibly empty) or a bare word.
static ARGUMENT_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("argument regex must compile"));

const PROMPT: &str = "> ";

/// Splits a shell line into arguments.
///
/// Double quotes group words and are removed; `""` is an empty argument.
pub fn tokenize(line: &str) -> Vec<String> {
  ARGUMENT_REGEX
    .captures_iter(line)
    .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
    .map(|m| m.as_str().to_string())
    .collect()
}

/// Reads commands from `input` until `exit`, `quit` or end of input.
///
/// Flags given on a line apply to that command only; flags left out fall
/// back to the session's. A failing or unparsable command is reported and
/// the shell keeps reading. The returned status is `Failed` if any command
/// failed.
pub fn run_shell<R: BufRead>(input: R, session: &GlobalArgs) -> Result<RunStatus> {
  if !is_quiet() {
    println!("Welcome to ilt v{}.", env!("CARGO_PKG_VERSION"));
    println!("Type \"help\" to list commands, \"exit\" to leave.");
    println!();
  }

  let mut status = RunStatus::Success;
  let mut lines = input.lines();

  loop {
    if !is_quiet() {
      print!("{}", PROMPT);
      std::io::stdout().flush()?;
    }

    let Some(line) = lines.next() else {
      break;
    };
    let line = line?;
    let tokens = tokenize(&line);

    match tokens.first().map(String::as_str) {
      None => continue,
      Some("exit" | "quit") => break,
      Some(_) => {}
    }

    debug!("Shell command: {:?}", tokens);

    let cli = match Cli::try_parse_from(std::iter::once("ilt".to_string()).chain(tokens)) {
      Ok(cli) => cli,
      Err(e) => {
        if e.print().is_err() {
          print_error(&e.to_string());
        }
        if !matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
          status = RunStatus::Failed;
        }
        continue;
      }
    };

    let command = match cli.command {
      Some(Command::Shell) => {
        print_error("The shell is already running");
        status = RunStatus::Failed;
        continue;
      }
      Some(command) => command,
      None => continue,
    };

    let global = cli.global.layered_over(session);
    global.apply_output_mode();

    match execute(command, &global) {
      Ok(RunStatus::Success) => {}
      Ok(RunStatus::Failed) => status = RunStatus::Failed,
      Err(e) => {
        print_error(&format!("{:#}", e));
        status = RunStatus::Failed;
      }
    }

    session.apply_output_mode();
  }

  Ok(status)
}
