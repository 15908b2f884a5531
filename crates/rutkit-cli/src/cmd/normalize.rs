//! Implementation of `rutkit normalize <RUT>...`.
//!
//! Prints each identifier in storage form (`12345678-5`), one per line,
//! with the same JSON shape as `format`.
use rutkit_core::IdentityNumberCodec;

use crate::OutputFormat;
use crate::cmd::format::write_transformed;
use crate::error::CliError;

/// Runs the `normalize` command.
///
/// # Errors
///
/// [`CliError::IoError`] if stdout cannot be written.
pub fn run(values: &[String], format: OutputFormat) -> Result<(), CliError> {
    let codec = IdentityNumberCodec::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_transformed(&mut out, values, format, |raw| codec.normalize(raw), &codec)
        .map_err(|e| CliError::write_failed("stdout", &e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn strips_grouping_and_uppercases() {
        let codec = IdentityNumberCodec::new();
        let values = vec!["12.345.678-5".to_owned(), " 12 345 670 k ".to_owned()];
        let mut buf = Vec::new();
        write_transformed(
            &mut buf,
            &values,
            OutputFormat::Human,
            |raw| codec.normalize(raw),
            &codec,
        )
        .expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "12345678-5\n12345670-K\n"
        );
    }
}
