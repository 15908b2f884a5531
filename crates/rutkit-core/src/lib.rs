#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod binder;
pub mod bmi;
pub mod check_digit;
pub mod codec;
pub mod diagnostic;
pub mod generator;
pub mod lookup;
pub mod rut;

pub use binder::{
    BoundField, ErrorSink, FieldEvent, FieldStatus, FormBinder, INVALID_FIELD_MESSAGE, NullSink,
    SplitFields, SubmitBlock, SubmitEvent, SubmitOutcome, TextField,
};
pub use bmi::{
    BmiClass, BmiError, PrePregnancyClass, PregnancyGuidance, RiskLevel, check_range, classify,
    compute_bmi, pregnancy_guidance,
};
pub use check_digit::{mod11_check_char, mod11_verify};
pub use codec::{IdentityNumberCodec, Parts};
pub use diagnostic::{Diagnostic, RuleId, Severity, ValidationResult, validate_batch};
pub use generator::{generate_batch, generate_iter};
pub use lookup::{
    Debouncer, LookupBanner, LookupClient, LookupConfig, LookupError, LookupResponse,
    LookupSequencer, PersonRecord, RequestTicket, Tone, lookup_url, perform_lookup,
};
pub use rut::{IdentifierError, Rut};

/// Returns the current version of the rutkit-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
