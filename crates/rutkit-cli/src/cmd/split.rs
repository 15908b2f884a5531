//! Implementation of `rutkit split <RUT>`.
//!
//! Prints the body and check character. Nothing is validated; input too
//! short to split yields empty parts.
use std::io::Write;

use rutkit_core::{IdentityNumberCodec, Parts};

use crate::OutputFormat;
use crate::error::CliError;

/// Runs the `split` command.
///
/// # Errors
///
/// [`CliError::IoError`] if stdout cannot be written.
pub fn run(value: &str, format: OutputFormat) -> Result<(), CliError> {
    let parts = IdentityNumberCodec::new().split(value);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_parts(&mut out, &parts, format).map_err(|e| CliError::write_failed("stdout", &e))
}

fn write_parts<W: Write>(w: &mut W, parts: &Parts, format: OutputFormat) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(w, "body:   {}", parts.body)?;
            writeln!(w, "check:  {}", parts.check)
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({ "body": parts.body, "check": parts.check });
            writeln!(w, "{obj}")
        }
    }
}
