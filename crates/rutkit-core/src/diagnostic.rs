/// Diagnostic types for batch identifier validation.
///
/// [`validate_batch`] checks one identifier per line and collects every
/// finding into a [`ValidationResult`]; it never stops at the first error.
/// The CLI renders the diagnostics in human or NDJSON form.
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::codec::IdentityNumberCodec;
use crate::rut::IdentifierError;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// The severity level of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The line is not a valid identifier.
    Error,
    /// The line is valid but suspect (e.g. repeated).
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("Error"),
            Self::Warning => f.write_str("Warning"),
        }
    }
}

// ---------------------------------------------------------------------------
// RuleId
// ---------------------------------------------------------------------------

/// Machine-readable identifier for the check that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleId {
    /// Value is empty.
    #[serde(rename = "required")]
    Required,
    /// Value is not seven or eight digits plus a check character.
    #[serde(rename = "invalid-format")]
    InvalidFormat,
    /// Check character does not match the body.
    #[serde(rename = "check-mismatch")]
    CheckMismatch,
    /// Same identifier already appeared on an earlier line.
    #[serde(rename = "duplicate")]
    Duplicate,
}

impl RuleId {
    /// Returns the hyphenated code used in serialized output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidFormat => "invalid-format",
            Self::CheckMismatch => "check-mismatch",
            Self::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&IdentifierError> for RuleId {
    fn from(err: &IdentifierError) -> Self {
        match err {
            IdentifierError::Required => Self::Required,
            IdentifierError::InvalidFormat { .. } => Self::InvalidFormat,
            IdentifierError::CheckDigitMismatch { .. } => Self::CheckMismatch,
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A single finding for one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The check that produced this finding.
    pub rule_id: RuleId,
    /// The severity of this finding.
    pub severity: Severity,
    /// One-based line number in the input.
    pub line: usize,
    /// The offending input, trimmed.
    pub input: String,
    /// A human-readable explanation of the problem.
    pub message: String,
}

impl Diagnostic {
    /// Constructs a new [`Diagnostic`].
    pub fn new(
        rule_id: RuleId,
        severity: Severity,
        line: usize,
        input: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id,
            severity,
            line,
            input: input.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_char = match self.severity {
            Severity::Error => 'E',
            Severity::Warning => 'W',
        };
        write!(
            f,
            "[{level_char}] {} line {}: {}",
            self.rule_id, self.line, self.message
        )
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Everything [`validate_batch`] found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// All findings, in input order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of non-blank lines checked.
    pub checked: usize,
    /// Number of lines that held a valid identifier.
    pub valid: usize,
}

impl ValidationResult {
    /// Returns `true` if any error-severity finding was recorded.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Iterates over error-severity findings.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Iterates over warning-severity findings.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Validates every non-blank line of `input` as an identifier.
///
/// Invalid lines produce an error diagnostic. A valid identifier that
/// repeats an earlier one (compared in normalized form) produces a warning
/// that points back at the first occurrence.
pub fn validate_batch(codec: &IdentityNumberCodec, input: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        result.checked += 1;

        match codec.validate_field(line) {
            Ok(rut) => {
                result.valid += 1;
                let key = rut.normalized();
                if let Some(&first) = first_seen.get(&key) {
                    result.diagnostics.push(Diagnostic::new(
                        RuleId::Duplicate,
                        Severity::Warning,
                        line_no,
                        line,
                        format!("{rut} already appeared on line {first}"),
                    ));
                } else {
                    first_seen.insert(key, line_no);
                }
            }
            Err(err) => {
                result.diagnostics.push(Diagnostic::new(
                    RuleId::from(&err),
                    Severity::Error,
                    line_no,
                    line,
                    err.to_string(),
                ));
            }
        }
    }

    tracing::debug!(
        checked = result.checked,
        valid = result.valid,
        findings = result.diagnostics.len(),
        "batch validation finished"
    );
    result
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn run(input: &str) -> ValidationResult {
        validate_batch(&IdentityNumberCodec::new(), input)
    }

    #[test]
    fn all_valid_lines_produce_no_diagnostics() {
        let result = run("12.345.678-5\n1234567-4\n12345670-k\n");
        assert_eq!(result.checked, 3);
        assert_eq!(result.valid, 3);
        assert!(result.diagnostics.is_empty());
        assert!(!result.has_errors());
    }

    #[test]
    fn blank_lines_are_skipped_but_keep_numbering() {
        let result = run("\n   \n12345678-9\n");
        assert_eq!(result.checked, 1);
        let diag = result.errors().next().expect("one error");
        assert_eq!(diag.line, 3);
        assert_eq!(diag.rule_id, RuleId::CheckMismatch);
    }

    #[test]
    fn bad_shape_is_invalid_format() {
        let result = run("1-9");
        let diag = result.errors().next().expect("one error");
        assert_eq!(diag.rule_id, RuleId::InvalidFormat);
        assert_eq!(diag.input, "1-9");
    }

    #[test]
    fn duplicates_in_different_notation_warn() {
        let result = run("12.345.678-5\n123456785\n");
        assert!(!result.has_errors());
        let warning = result.warnings().next().expect("one warning");
        assert_eq!(warning.rule_id, RuleId::Duplicate);
        assert_eq!(warning.line, 2);
        assert!(warning.message.contains("line 1"), "{}", warning.message);
    }

    #[test]
    fn display_includes_tag_rule_and_line() {
        let result = run("12345678-9");
        let text = result.diagnostics[0].to_string();
        assert!(text.starts_with("[E] check-mismatch line 1:"), "{text}");
    }

    #[test]
    fn diagnostic_serializes_with_codes() {
        let result = run("abc");
        let json = serde_json::to_value(&result.diagnostics[0]).expect("serialize");
        assert_eq!(json["rule_id"], "invalid-format");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["line"], 1);
    }
}
