//! Implementation of `rutkit format <RUT>...`.
//!
//! Prints each identifier in display form (`12.345.678-5`), one per line.
//! Input too short to split is echoed unchanged; formatting never fails.
//! In JSON mode each line is `{"input":..,"output":..,"valid":..}`.
use std::io::Write;

use rutkit_core::IdentityNumberCodec;

use crate::OutputFormat;
use crate::error::CliError;

/// Runs the `format` command.
///
/// # Errors
///
/// [`CliError::IoError`] if stdout cannot be written.
pub fn run(values: &[String], format: OutputFormat) -> Result<(), CliError> {
    let codec = IdentityNumberCodec::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_transformed(&mut out, values, format, |raw| codec.format(raw), &codec)
        .map_err(|e| CliError::write_failed("stdout", &e))
}

/// Writes one transformed line per value. Shared with `normalize`.
pub(crate) fn write_transformed<W: Write>(
    w: &mut W,
    values: &[String],
    format: OutputFormat,
    transform: impl Fn(&str) -> String,
    codec: &IdentityNumberCodec,
) -> std::io::Result<()> {
    for raw in values {
        let output = transform(raw);
        match format {
            OutputFormat::Human => writeln!(w, "{output}")?,
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "input": raw,
                    "output": output,
                    "valid": codec.is_valid(raw),
                });
                writeln!(w, "{line}")?;
            }
        }
    }
    Ok(())
}
