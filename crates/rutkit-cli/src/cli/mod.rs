//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits colored diagnostics to stderr and plain text to stdout.
/// `Json` emits NDJSON diagnostics and one JSON object per result.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// All top-level subcommands exposed by the `rutkit` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Validate identifiers, one per line.
    Validate {
        /// Path to a text file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Print identifiers in display form (12.345.678-5).
    Format {
        /// Identifiers in any notation.
        #[arg(value_name = "RUT", num_args = 1.., required = true)]
        values: Vec<String>,
    },

    /// Print identifiers in storage form (12345678-5).
    Normalize {
        /// Identifiers in any notation.
        #[arg(value_name = "RUT", num_args = 1.., required = true)]
        values: Vec<String>,
    },

    /// Split an identifier into body and check character.
    Split {
        /// An identifier in any notation.
        #[arg(value_name = "RUT")]
        value: String,
    },

    /// Compute the check character for one or more bodies.
    #[command(name = "check-digit")]
    CheckDigit {
        /// Identifier bodies; non-digit characters are ignored.
        #[arg(value_name = "BODY", num_args = 1.., required = true)]
        bodies: Vec<String>,
    },

    /// Generate random valid identifiers for test data.
    Generate {
        /// How many identifiers to generate.
        #[arg(long, short = 'n', default_value = "1")]
        count: usize,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compute and classify a body-mass index.
    Bmi {
        /// Weight in kilograms.
        #[arg(long, value_name = "KG")]
        weight: f64,
        /// Height in centimetres.
        #[arg(long, value_name = "CM")]
        height: f64,
        /// Also print gestational weight-gain guidance.
        #[arg(long)]
        pregnant: bool,
    },
}

/// Root CLI struct for the `rutkit` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "rutkit",
    version,
    about = "RUT identity number toolkit",
    long_about = "Validates, formats, normalizes and generates RUT identity numbers\n\
                  (modulo-11 check character), and computes body-mass index."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: timing and debug logging
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `RUTKIT_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 16777216 (16 MB).
    #[arg(
        long,
        global = true,
        env = "RUTKIT_MAX_FILE_SIZE",
        default_value = "16777216"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests;
