//! Implementation of `rutkit check-digit <BODY>...`.
//!
//! Prints the computed check character for each body. Stops with exit code
//! 1 at the first body that has no digits.
use std::io::Write;

use rutkit_core::IdentityNumberCodec;

use crate::OutputFormat;
use crate::error::CliError;

/// Runs the `check-digit` command.
///
/// # Errors
///
/// - [`CliError::NoCheckDigit`] for a body without digits.
/// - [`CliError::IoError`] if stdout cannot be written.
pub fn run(bodies: &[String], format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_checks(&mut out, bodies, format)
}

fn write_checks<W: Write>(
    w: &mut W,
    bodies: &[String],
    format: OutputFormat,
) -> Result<(), CliError> {
    let codec = IdentityNumberCodec::new();
    let write_failed = |e: std::io::Error| CliError::write_failed("stdout", &e);
    for body in bodies {
        let check = codec.compute_check_digit(body);
        if check.is_empty() {
            return Err(CliError::NoCheckDigit { body: body.clone() });
        }
        match format {
            OutputFormat::Human => writeln!(w, "{check}").map_err(write_failed)?,
            OutputFormat::Json => {
                let line = serde_json::json!({ "body": body, "check": check });
                writeln!(w, "{line}").map_err(write_failed)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use super::*;

    fn bodies(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn prints_one_check_per_body() {
        let mut buf = Vec::new();
        write_checks(
            &mut buf,
            &bodies(&["12345678", "12.345.670", "10000004"]),
            OutputFormat::Human,
        )
        .expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "5\nK\n0\n");
    }

    #[test]
    fn body_without_digits_fails_after_earlier_output() {
        let mut buf = Vec::new();
        let err = write_checks(&mut buf, &bodies(&["1234567", "abc"]), OutputFormat::Human)
            .expect_err("no digits");
        match err {
            CliError::NoCheckDigit { body } => assert_eq!(body, "abc"),
            other => panic!("expected NoCheckDigit, got {other:?}"),
        }
        assert_eq!(String::from_utf8(buf).expect("utf8"), "4\n");
    }

    #[test]
    fn json_output_pairs_body_and_check() {
        let mut buf = Vec::new();
        write_checks(&mut buf, &bodies(&["9999999"]), OutputFormat::Json).expect("write");
        let v: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(v["check"], "3");
    }
}
