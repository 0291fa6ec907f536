//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing; every subcommand can also be typed at
//! the interactive shell, which is started when no subcommand is given.

mod insert;
mod shell;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
pub use insert::{AutoArgs, PlaceholderArgs, RunStatus, SpecialArgs, run_auto, run_special};
pub use shell::{run_shell, tokenize};

use crate::logging::{ColorMode, init_tracing, set_normal, set_quiet, set_verbose};
use crate::output::print_items;
use crate::templates::{LICENSES, TemplateStore};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Environment variable pointing at a custom license-texts resource.
pub const LICENSE_TEXTS_ENV_VAR: &str = "ILT_LICENSE_TEXTS";

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "ilt",
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Insert the LGPL header into every recognized file under ./code
  ilt auto lgpl ./code --year 2023 --holder \"imlystyi\" --special-line \"ilt - insert license text!\"

  # Same, skipping JavaScript and C files and anything under vendor/
  ilt auto lgpl ./code --ignore-ext \".js .c\" --ignore-dir vendor

  # Insert into every .kt file with an explicit comment syntax
  ilt special mit ./code --ext .kt --comment \"//\" --year 0

  # Insert into one file
  ilt special mit ./code/build.gradle --comment \"//\"

  # List available licenses
  ilt licenses

  # Start the interactive shell
  ilt
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub global: GlobalArgs,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Suppress all output except errors and the list of modified files
  #[arg(short, long, conflicts_with = "verbose", global = true)]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum,
    global = true
  )]
  pub colors: ColorMode,

  /// Read license texts from this file instead of the bundled ones
  #[arg(long, value_name = "FILE", env = LICENSE_TEXTS_ENV_VAR, global = true)]
  pub license_texts: Option<PathBuf>,
}

impl GlobalArgs {
  /// Installs tracing and applies the verbosity and color flags.
  pub fn configure_output(&self) {
    init_tracing(self.quiet, self.verbose);
    self.apply_output_mode();
  }

  /// Applies the verbosity and color flags to user-facing output.
  ///
  /// Unlike [`configure_output`](Self::configure_output) this can be called
  /// repeatedly, e.g. once per shell command.
  pub fn apply_output_mode(&self) {
    if self.verbose > 0 {
      set_verbose();
    } else if self.quiet {
      set_quiet();
    } else {
      set_normal();
    }
    self.colors.apply();
  }

  /// Flags from one shell line, with the session's flags filling in
  /// whatever the line left out.
  pub fn layered_over(self, session: &GlobalArgs) -> GlobalArgs {
    let line_sets_verbosity = self.verbose > 0 || self.quiet;

    GlobalArgs {
      verbose: if line_sets_verbosity { self.verbose } else { session.verbose },
      quiet: if line_sets_verbosity { self.quiet } else { session.quiet },
      colors: if self.colors == ColorMode::Auto {
        session.colors
      } else {
        self.colors
      },
      license_texts: self.license_texts.or_else(|| session.license_texts.clone()),
    }
  }

  /// The template store selected by `--license-texts`.
  pub fn template_store(&self) -> Result<TemplateStore> {
    match &self.license_texts {
      Some(path) => Ok(TemplateStore::from_file(path)?),
      None => Ok(TemplateStore::bundled()),
    }
  }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Insert the license into every file under a root whose extension has a
  /// known comment syntax
  Auto(AutoArgs),
  /// Insert the license into one file, or into every file with one
  /// extension, using an explicit comment syntax
  Special(SpecialArgs),
  /// List the available licenses
  Licenses,
  /// Show information about the application
  About,
  /// Start the interactive shell (default)
  Shell,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Runs the parsed command line.
pub fn run(cli: Cli) -> Result<RunStatus> {
  cli.global.configure_output();

  match cli.command {
    None | Some(Command::Shell) => {
      let stdin = std::io::stdin();
      run_shell(stdin.lock(), &cli.global)
    }
    Some(command) => execute(command, &cli.global),
  }
}

/// Runs one non-shell command.
pub fn execute(command: Command, global: &GlobalArgs) -> Result<RunStatus> {
  match command {
    Command::Auto(args) => run_auto(args, global),
    Command::Special(args) => run_special(args, global),
    Command::Licenses => {
      run_licenses(global)?;
      Ok(RunStatus::Success)
    }
    Command::About => {
      print_about();
      Ok(RunStatus::Success)
    }
    Command::Shell => anyhow::bail!("The shell is already running"),
  }
}

fn run_licenses(global: &GlobalArgs) -> Result<()> {
  if global.license_texts.is_some() {
    print_items(global.template_store()?.names());
  } else {
    print_items(LICENSES);
  }
  Ok(())
}

fn print_about() {
  let git_hash = option_env!("ILT_GIT_HASH").filter(|hash| !hash.is_empty());

  println!("About application");
  println!("{}", "-".repeat(74));
  println!("ilt - insert license text!");
  println!("This application can help you quickly insert license text into your files.");
  match git_hash {
    Some(hash) => println!("Version {} ({}).", env!("CARGO_PKG_VERSION"), hash),
    None => println!("Version {}.", env!("CARGO_PKG_VERSION")),
  }
  println!("Licensed under {}.", env!("CARGO_PKG_LICENSE"));
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_no_subcommand_means_shell() {
    let cli = Cli::try_parse_from(["ilt"]).unwrap();
    assert!(cli.command.is_none());
  }

  #[test]
  fn test_line_flags_layer_over_session() {
    let session = GlobalArgs {
      verbose: 0,
      quiet: true,
      colors: ColorMode::Never,
      license_texts: Some(PathBuf::from("/texts")),
    };

    let inherited = Cli::try_parse_from(["ilt", "licenses"]).unwrap().global.layered_over(&session);
    assert!(inherited.quiet);
    assert_eq!(inherited.colors, ColorMode::Never);
    assert_eq!(inherited.license_texts, Some(PathBuf::from("/texts")));

    let overridden = Cli::try_parse_from(["ilt", "licenses", "-v", "--colors", "always"])
      .unwrap()
      .global
      .layered_over(&session);
    assert_eq!(overridden.verbose, 1);
    assert!(!overridden.quiet);
    assert_eq!(overridden.colors, ColorMode::Always);
  }

  #[test]
  fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["ilt", "licenses", "-q", "--colors", "never"]).unwrap();
    assert!(cli.global.quiet);
    assert_eq!(cli.global.colors, ColorMode::Never);
    assert!(matches!(cli.command, Some(Command::Licenses)));
  }
}
