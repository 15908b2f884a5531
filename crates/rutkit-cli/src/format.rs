/// Diagnostic formatting: human-readable and JSON (NDJSON) modes.
///
/// - **Human mode** (default): one line per diagnostic, color-coded by
///   severity, to stderr. Colors are disabled when `--no-color` is set, the
///   `NO_COLOR` environment variable is present (per <https://no-color.org>),
///   or stderr is not a TTY.
/// - **JSON mode**: each diagnostic is serialized as a single-line JSON object
///   (NDJSON) to stderr.
///
/// Both modes honor **quiet** (errors only, no summary) and **verbose**
/// (adds timing).
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use rutkit_core::{Diagnostic, Severity, ValidationResult};

use crate::OutputFormat;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the diagnostic formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colors {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Writes one [`Diagnostic`] in the requested format.
///
/// Human: `[E] check-mismatch  line 3: check character mismatch: ...`
///
/// Warnings are dropped in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic<W: Write>(
    writer: &mut W,
    diag: &Diagnostic,
    format: OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet && diag.severity == Severity::Warning {
        return Ok(());
    }
    match format {
        OutputFormat::Human => {
            let tag = match diag.severity {
                Severity::Error => config.paint(ANSI_RED, "[E]"),
                Severity::Warning => config.paint(ANSI_YELLOW, "[W]"),
            };
            writeln!(
                writer,
                "{tag} {rule_id}  line {line}: {message}",
                rule_id = diag.rule_id,
                line = diag.line,
                message = diag.message,
            )
        }
        OutputFormat::Json => {
            let line = serde_json::to_string(diag).map_err(std::io::Error::other)?;
            writeln!(writer, "{line}")
        }
    }
}

/// Writes the closing summary for a validation run.
///
/// Human: `4 checked, 3 valid, 1 error, 0 warnings`.
/// JSON: `{"summary":{"checked":4,"valid":3,"errors":1,"warnings":0}}`.
///
/// Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary<W: Write>(
    writer: &mut W,
    result: &ValidationResult,
    format: OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    let errors = result.errors().count();
    let warnings = result.warnings().count();
    match format {
        OutputFormat::Human => {
            let valid = format!("{} valid", result.valid);
            let valid = if errors == 0 {
                config.paint(ANSI_GREEN, &valid)
            } else {
                valid
            };
            writeln!(
                writer,
                "{} checked, {valid}, {errors} {}, {warnings} {}",
                result.checked,
                pluralize(errors, "error", "errors"),
                pluralize(warnings, "warning", "warnings"),
            )
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "summary": {
                    "checked": result.checked,
                    "valid": result.valid,
                    "errors": errors,
                    "warnings": warnings,
                }
            });
            writeln!(writer, "{summary}")
        }
    }
}

/// Writes timing information in verbose mode; a no-op otherwise.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
