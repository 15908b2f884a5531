//! The identity number codec: canonicalization, splitting, check character
//! computation, validation and display formatting.
//!
//! [`IdentityNumberCodec`] is a stateless value. Callers construct their own
//! instance and pass it where it is needed; nothing is registered globally.
//! None of the operations fail on malformed input: validation answers with a
//! `bool` and the string operations pass malformed input through unchanged.
//! [`IdentityNumberCodec::validate_field`] is the one operation that reports
//! *why* an input was rejected.
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::check_digit::mod11_check_char;
use crate::rut::{IdentifierError, Rut};

/// Smallest body produced by [`IdentityNumberCodec::generate_random_valid`].
pub const MIN_GENERATED_BODY: u32 = 1_000_000;

/// Largest body produced by [`IdentityNumberCodec::generate_random_valid`].
pub const MAX_GENERATED_BODY: u32 = 99_999_999;

/// Grouping separator inserted every three body digits.
pub const GROUP_SEPARATOR: char = '.';

/// Separator between body and check character.
pub const CHECK_SEPARATOR: char = '-';

/// Seven or eight ASCII digits followed by one check character.
///
/// Applied to canonical (already uppercased) input. `[0-9]` is spelled out
/// because `\d` matches every Unicode decimal digit.
static SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{7,8}[0-9K]$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

/// Body and check character of an identifier, as produced by
/// [`IdentityNumberCodec::split`].
///
/// Both fields are empty when the canonical input is shorter than two
/// characters. No validation is implied: `body` may contain non-digits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parts {
    /// Every canonical character except the last.
    pub body: String,
    /// The last canonical character, uppercased.
    pub check: String,
}

impl Parts {
    /// Returns `true` if either half is empty.
    pub fn is_incomplete(&self) -> bool {
        self.body.is_empty() || self.check.is_empty()
    }
}

/// Whitespace, plus U+FEFF which copy-paste from some sources leaves behind.
pub(crate) fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// `true` when `raw` holds nothing but [`is_space`] characters.
pub(crate) fn is_blank(raw: &str) -> bool {
    raw.chars().all(is_space)
}

/// Canonicalizes, validates, formats and generates RUT identity numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityNumberCodec;

impl IdentityNumberCodec {
    /// Creates a codec.
    pub fn new() -> Self {
        Self
    }

    /// Strips every `.`, `-` and whitespace character (including a pasted
    /// byte-order mark) and uppercases the rest.
    ///
    /// Performs no length or content validation and never fails.
    ///
    /// ```
    /// use rutkit_core::IdentityNumberCodec;
    ///
    /// let codec = IdentityNumberCodec::new();
    /// assert_eq!(codec.canonicalize(" 12.345.670-k "), "12345670K");
    /// ```
    pub fn canonicalize(&self, raw: &str) -> String {
        raw.chars()
            .filter(|c| *c != GROUP_SEPARATOR && *c != CHECK_SEPARATOR && !is_space(*c))
            .collect::<String>()
            .to_uppercase()
    }

    /// Splits `raw` into body and check character.
    ///
    /// Returns empty [`Parts`] when the canonical form has fewer than two
    /// characters.
    pub fn split(&self, raw: &str) -> Parts {
        let canonical = self.canonicalize(raw);
        let mut chars = canonical.chars();
        let Some(last) = chars.next_back() else {
            return Parts::default();
        };
        let body = chars.as_str();
        if body.is_empty() {
            return Parts::default();
        }
        Parts {
            body: body.to_owned(),
            check: last.to_uppercase().collect(),
        }
    }

    /// Computes the check character for `body`.
    ///
    /// Non-digit characters are ignored. Returns an empty string when `body`
    /// has no digits, meaning "cannot compute".
    ///
    /// ```
    /// use rutkit_core::IdentityNumberCodec;
    ///
    /// let codec = IdentityNumberCodec::new();
    /// assert_eq!(codec.compute_check_digit("12345678"), "5");
    /// assert_eq!(codec.compute_check_digit(""), "");
    /// ```
    pub fn compute_check_digit(&self, body: &str) -> String {
        mod11_check_char(body).map(String::from).unwrap_or_default()
    }

    /// Returns `true` if `raw` is a well-shaped identifier whose check
    /// character matches its body.
    ///
    /// Never panics and never reports an error; use
    /// [`validate_field`](Self::validate_field) to learn why an input failed.
    pub fn is_valid(&self, raw: &str) -> bool {
        let canonical = self.canonicalize(raw);
        if canonical.len() < 2 || !SHAPE_RE.is_match(&canonical) {
            return false;
        }
        let parts = self.split(&canonical);
        let expected = self.compute_check_digit(&parts.body);
        !expected.is_empty() && parts.check.eq_ignore_ascii_case(&expected)
    }

    /// Formats `raw` for display as `NN.NNN.NNN-D`.
    ///
    /// The body is grouped by three from the right regardless of content.
    /// Input too short to split is returned unchanged. The operation is
    /// idempotent.
    ///
    /// ```
    /// use rutkit_core::IdentityNumberCodec;
    ///
    /// let codec = IdentityNumberCodec::new();
    /// assert_eq!(codec.format("123456789"), "12.345.678-9");
    /// assert_eq!(codec.format("1"), "1");
    /// ```
    pub fn format(&self, raw: &str) -> String {
        let parts = self.split(raw);
        if parts.is_incomplete() {
            return raw.to_owned();
        }
        format!(
            "{}{CHECK_SEPARATOR}{}",
            group_by_thousands(&parts.body),
            parts.check
        )
    }

    /// Normalizes `raw` to the storage form `NNNNNNNN-D` (no grouping).
    ///
    /// Input too short to split is returned unchanged.
    pub fn normalize(&self, raw: &str) -> String {
        let parts = self.split(raw);
        if parts.is_incomplete() {
            return raw.to_owned();
        }
        format!("{}{CHECK_SEPARATOR}{}", parts.body, parts.check)
    }

    /// Validates a submitted field value and returns the parsed [`Rut`].
    ///
    /// # Errors
    ///
    /// - [`IdentifierError::Required`] if `raw` is empty or only whitespace.
    /// - [`IdentifierError::InvalidFormat`] if the canonical form is not seven
    ///   or eight digits followed by a digit or `K`.
    /// - [`IdentifierError::CheckDigitMismatch`] if the check character does
    ///   not match the body.
    pub fn validate_field(&self, raw: &str) -> Result<Rut, IdentifierError> {
        if is_blank(raw) {
            return Err(IdentifierError::Required);
        }
        let canonical = self.canonicalize(raw);
        if !SHAPE_RE.is_match(&canonical) {
            return Err(IdentifierError::InvalidFormat {
                got: raw.to_owned(),
            });
        }
        let parts = self.split(&canonical);
        let expected = mod11_check_char(&parts.body).ok_or_else(|| IdentifierError::InvalidFormat {
            got: raw.to_owned(),
        })?;
        let got = parts.check.chars().next().unwrap_or_default();
        if got != expected {
            return Err(IdentifierError::CheckDigitMismatch { expected, got });
        }
        Ok(Rut::from_validated(parts.body, expected))
    }

    /// Returns a random valid identifier in display format.
    ///
    /// Intended for test data only.
    pub fn generate_random_valid(&self) -> String {
        self.generate_random_valid_with(&mut rand::thread_rng())
    }

    /// Like [`generate_random_valid`](Self::generate_random_valid) but draws
    /// from the supplied RNG, so a seeded `StdRng` gives reproducible output.
    ///
    /// The body is uniform over
    /// [`MIN_GENERATED_BODY`]`..=`[`MAX_GENERATED_BODY`].
    pub fn generate_random_valid_with<R: Rng>(&self, rng: &mut R) -> String {
        let body = rng.gen_range(MIN_GENERATED_BODY..=MAX_GENERATED_BODY).to_string();
        let check = self.compute_check_digit(&body);
        self.format(&format!("{body}{check}"))
    }
}

/// Inserts [`GROUP_SEPARATOR`] every three characters counting from the
/// right.
fn group_by_thousands(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len() + chars.len() / 3);
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(*ch);
    }
    out
}
