/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `rutkit` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The tool could not read the input or
///   was given measurements it cannot compute with.
/// - Exit code **1**: logical failure. The tool ran to completion but the
///   result is a well-defined failure (invalid identifiers, no check
///   character).
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `rutkit` CLI can produce.
///
/// Use [`CliError::exit_code`] to obtain the exit code associated with each
/// variant. [`CliError::message`] returns the human-readable error string
/// that should be printed to stderr before exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes; `None` for stdin.
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// Weight or height cannot be used to compute a BMI.
    InvalidMeasurement {
        /// Why the measurement was rejected.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// One or more input lines were not valid identifiers.
    ///
    /// The diagnostics have already been printed.
    ValidationErrors {
        /// Number of invalid lines.
        invalid: usize,
    },

    /// A body contained no digits, so no check character exists.
    NoCheckDigit {
        /// The body as given.
        body: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::InvalidMeasurement { .. } => 2,

            Self::ValidationErrors { .. } | Self::NoCheckDigit { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::InvalidMeasurement { detail } => {
                format!("error: invalid measurement: {detail}")
            }
            Self::ValidationErrors { invalid: 1 } => {
                "error: validation failed: 1 invalid identifier".to_owned()
            }
            Self::ValidationErrors { invalid } => {
                format!("error: validation failed: {invalid} invalid identifiers")
            }
            Self::NoCheckDigit { body } => {
                format!("error: cannot compute a check character for {body:?}: no digits")
            }
        }
    }

    /// Wraps a write failure on `stream` (`"stdout"` or `"stderr"`).
    pub fn write_failed(stream: &str, e: &std::io::Error) -> Self {
        Self::IoError {
            source: stream.to_owned(),
            detail: e.to_string(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::path::PathBuf;

    use super::*;

    // ── exit_code ────────────────────────────────────────────────────────────

    #[test]
    fn file_not_found_is_exit_2() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("ids.txt"),
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn file_too_large_is_exit_2() {
        let e = CliError::FileTooLarge {
            source: "big.txt".to_owned(),
            limit: 1024,
            actual: Some(2048),
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn invalid_utf8_is_exit_2() {
        let e = CliError::InvalidUtf8 {
            source: "bad.txt".to_owned(),
            byte_offset: 42,
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn invalid_measurement_is_exit_2() {
        let e = CliError::InvalidMeasurement {
            detail: "weight must be greater than 0 kg, got 0".to_owned(),
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn validation_errors_is_exit_1() {
        assert_eq!(CliError::ValidationErrors { invalid: 3 }.exit_code(), 1);
    }

    #[test]
    fn no_check_digit_is_exit_1() {
        let e = CliError::NoCheckDigit {
            body: "abc".to_owned(),
        };
        assert_eq!(e.exit_code(), 1);
    }

    // ── message content ──────────────────────────────────────────────────────

    #[test]
    fn file_not_found_message_contains_path() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("patients.txt"),
        };
        let msg = e.message();
        assert!(msg.contains("patients.txt"), "message: {msg}");
        assert!(msg.contains("not found"), "message: {msg}");
    }

    #[test]
    fn file_too_large_without_actual_mentions_limit() {
        let e = CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: 512,
            actual: None,
        };
        let msg = e.message();
        assert!(msg.contains("512"), "message: {msg}");
    }

    #[test]
    fn validation_errors_message_counts_lines() {
        let one = CliError::ValidationErrors { invalid: 1 }.message();
        assert!(one.ends_with("1 invalid identifier"), "message: {one}");
        let many = CliError::ValidationErrors { invalid: 4 }.message();
        assert!(many.ends_with("4 invalid identifiers"), "message: {many}");
    }

    #[test]
    fn no_check_digit_message_quotes_body() {
        let msg = CliError::NoCheckDigit {
            body: "--".to_owned(),
        }
        .message();
        assert!(msg.contains("\"--\""), "message: {msg}");
    }

    #[test]
    fn display_matches_message() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("x.txt"),
        };
        assert_eq!(format!("{e}"), e.message());
    }

    #[test]
    fn error_trait_is_implemented() {
        let e: Box<dyn std::error::Error> = Box::new(CliError::ValidationErrors { invalid: 1 });
        assert!(!e.to_string().is_empty());
    }
}
