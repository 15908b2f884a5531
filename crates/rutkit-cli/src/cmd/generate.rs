//! Implementation of `rutkit generate [--count N] [--seed S]`.
//!
//! Prints random valid identifiers in display form for test data. The
//! same seed always yields the same list.
use std::io::Write;

use rutkit_core::{Rut, generate_iter};

use crate::OutputFormat;
use crate::error::CliError;

/// Runs the `generate` command.
///
/// # Errors
///
/// [`CliError::IoError`] if stdout cannot be written.
pub fn run(count: usize, seed: Option<u64>, format: OutputFormat) -> Result<(), CliError> {
    tracing::debug!(count, ?seed, "generating identifiers");
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_ruts(&mut out, generate_iter(seed).take(count), format)
        .map_err(|e| CliError::write_failed("stdout", &e))
}

/// Writes each identifier as it is produced.
fn write_ruts<W: Write>(
    w: &mut W,
    ruts: impl IntoIterator<Item = Rut>,
    format: OutputFormat,
) -> std::io::Result<()> {
    for rut in ruts {
        match format {
            OutputFormat::Human => writeln!(w, "{rut}")?,
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "formatted": rut.formatted(),
                    "normalized": rut.normalized(),
                });
                writeln!(w, "{line}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use rutkit_core::IdentityNumberCodec;

    use super::*;

    #[test]
    fn human_lines_are_valid_formatted_identifiers() {
        let mut buf = Vec::new();
        write_ruts(&mut buf, generate_iter(Some(7)).take(10), OutputFormat::Human).expect("write");
        let out = String::from_utf8(buf).expect("utf8");
        let codec = IdentityNumberCodec::new();
        assert_eq!(out.lines().count(), 10);
        for line in out.lines() {
            assert!(codec.is_valid(line), "{line}");
            assert_eq!(codec.format(line), line);
        }
    }

    #[test]
    fn json_lines_include_both_forms() {
        let mut buf = Vec::new();
        write_ruts(&mut buf, generate_iter(Some(7)).take(1), OutputFormat::Json).expect("write");
        let v: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        let formatted = v["formatted"].as_str().expect("formatted");
        let normalized = v["normalized"].as_str().expect("normalized");
        assert_eq!(formatted.replace('.', ""), normalized);
    }

    #[test]
    fn huge_count_streams_until_the_writer_fails() {
        // A writer that accepts a few lines then errors stops generation
        // without materializing the full count.
        struct Limited(usize);
        impl Write for Limited {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                if buf.contains(&b'\n') {
                    if self.0 == 0 {
                        return Err(std::io::Error::other("full"));
                    }
                    self.0 -= 1;
                }
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let mut w = Limited(3);
        let result = write_ruts(&mut w, generate_iter(Some(1)).take(usize::MAX), OutputFormat::Human);
        assert!(result.is_err());
        assert_eq!(w.0, 0);
    }
}
