//! Implementation of `rutkit validate <file>`.
//!
//! Checks one identifier per non-blank line and emits diagnostics to
//! stderr, followed by a summary.
//!
//! Exit codes:
//! - 0 = every line holds a valid identifier (duplicates only warn)
//! - 1 = at least one invalid line
//! - 2 = the input could not be read
use std::time::Instant;

use rutkit_core::{IdentityNumberCodec, validate_batch};

use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_diagnostic, write_summary, write_timing};

/// Runs the `validate` command over already-read `content`.
///
/// # Errors
///
/// - [`CliError::ValidationErrors`] when one or more lines are invalid.
/// - [`CliError::IoError`] if stderr cannot be written.
pub fn run(
    content: &str,
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> Result<(), CliError> {
    let started = Instant::now();
    let codec = IdentityNumberCodec::new();
    let result = validate_batch(&codec, content);

    let fmt_config = FormatterConfig::from_flags(no_color, quiet, verbose);
    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();
    let write_failed = |e: std::io::Error| CliError::write_failed("stderr", &e);

    for diag in &result.diagnostics {
        write_diagnostic(&mut err_out, diag, format, &fmt_config).map_err(write_failed)?;
    }
    write_summary(&mut err_out, &result, format, &fmt_config).map_err(write_failed)?;
    write_timing(&mut err_out, "validated", started.elapsed(), &fmt_config)
        .map_err(write_failed)?;

    let invalid = result.errors().count();
    if invalid > 0 {
        Err(CliError::ValidationErrors { invalid })
    } else {
        Ok(())
    }
}
