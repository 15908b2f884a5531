/// Validated [`Rut`] newtype and the errors produced when parsing one.
///
/// A `Rut` can only exist for an identifier whose check character matches
/// its body. Construction goes through [`TryFrom<&str>`] (or
/// [`IdentityNumberCodec::validate_field`]), and the serde `Deserialize`
/// impl re-runs validation so invalid data cannot enter the type system from
/// untrusted JSON.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::codec::{CHECK_SEPARATOR, IdentityNumberCodec};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Why an identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The input was empty or only whitespace.
    #[error("identifier is required")]
    Required,

    /// The canonical form is not seven or eight digits plus a check character.
    #[error("invalid identifier format: expected 7-8 digits and a check character like 12345678-9, got {got:?}")]
    InvalidFormat {
        /// The input that was rejected.
        got: String,
    },

    /// The check character does not match the body.
    #[error("check character mismatch: expected {expected}, got {got}")]
    CheckDigitMismatch {
        /// The check character computed from the body.
        expected: char,
        /// The check character present in the input.
        got: char,
    },
}

// ---------------------------------------------------------------------------
// Rut
// ---------------------------------------------------------------------------

/// A RUT identity number whose check character has been verified.
///
/// `Display` renders the grouped form (`12.345.678-5`); serde uses the
/// normalized storage form (`12345678-5`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rut {
    body: String,
    check: char,
}

impl Rut {
    /// Builds a `Rut` from parts that the codec has already verified.
    pub(crate) fn from_validated(body: String, check: char) -> Self {
        Self { body, check }
    }

    /// The digits before the check character.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The check character, `'0'..='9'` or `'K'`.
    pub fn check(&self) -> char {
        self.check
    }

    /// The body as an integer.
    ///
    /// Returns `0` if the body cannot be parsed, which cannot happen for a
    /// correctly validated `Rut`.
    pub fn number(&self) -> u32 {
        self.body.parse().unwrap_or(0)
    }

    /// Separator-free uppercase form, e.g. `123456785`.
    pub fn canonical(&self) -> String {
        format!("{}{}", self.body, self.check)
    }

    /// Storage form, e.g. `12345678-5`.
    pub fn normalized(&self) -> String {
        format!("{}{CHECK_SEPARATOR}{}", self.body, self.check)
    }

    /// Display form, e.g. `12.345.678-5`.
    pub fn formatted(&self) -> String {
        IdentityNumberCodec::new().format(&self.canonical())
    }
}

impl TryFrom<&str> for Rut {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        IdentityNumberCodec::new().validate_field(s)
    }
}

impl FromStr for Rut {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl Serialize for Rut {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized())
    }
}

impl<'de> Deserialize<'de> for Rut {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}
