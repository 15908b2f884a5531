mod cli;
mod cmd;
mod error;
mod format;
mod io;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use crate::error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    tracing::debug!(version = rutkit_core::version(), "rutkit starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.message());
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the level
/// implied by `--quiet` / `--verbose`.
fn init_tracing(quiet: bool, verbose: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let format = cli.format;
    match cli.command {
        Command::Validate { file } => {
            let content = io::read_input(&file, cli.max_file_size)?;
            cmd::validate::run(&content, format, cli.quiet, cli.verbose, cli.no_color)
        }
        Command::Format { values } => cmd::format::run(&values, format),
        Command::Normalize { values } => cmd::normalize::run(&values, format),
        Command::Split { value } => cmd::split::run(&value, format),
        Command::CheckDigit { bodies } => cmd::check_digit::run(&bodies, format),
        Command::Generate { count, seed } => cmd::generate::run(count, seed, format),
        Command::Bmi {
            weight,
            height,
            pregnant,
        } => cmd::bmi::run(weight, height, pregnant, format, cli.quiet),
    }
}
