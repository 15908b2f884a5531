//! Pure modulo-11 check character arithmetic for RUT identity numbers.
//!
//! These functions are called by the codec after it has canonicalized the
//! input. Both operate directly on the bytes of the input string slice and
//! never allocate.
//!
//! # Algorithm
//!
//! Digits are weighted from the rightmost one leftwards with the repeating
//! sequence `2, 3, 4, 5, 6, 7, 2, 3, …`. The weighted sum is reduced modulo
//! 11 and subtracted from 11:
//!
//! - 11 maps to `'0'`
//! - 10 maps to `'K'`
//! - anything else is its own decimal digit

/// First weight applied to the least significant digit.
const FIRST_WEIGHT: u32 = 2;

/// Last weight in the cycle; the next digit wraps back to [`FIRST_WEIGHT`].
const LAST_WEIGHT: u32 = 7;

/// Computes the check character for `body`.
///
/// Non-digit bytes are skipped, so `"12.345.678"` and `"12345678"` produce
/// the same result. Returns `None` when `body` contains no ASCII digit at
/// all, which callers must treat as "cannot compute".
///
/// The sum is reduced modulo 11 as it accumulates, so arbitrarily long input
/// cannot overflow.
///
/// # Examples
///
/// ```
/// use rutkit_core::check_digit::mod11_check_char;
///
/// assert_eq!(mod11_check_char("12345678"), Some('5'));
/// assert_eq!(mod11_check_char("12345670"), Some('K'));
/// assert_eq!(mod11_check_char("no digits"), None);
/// ```
pub fn mod11_check_char(body: &str) -> Option<char> {
    let mut seen_digit = false;
    let mut sum: u32 = 0;
    let mut weight = FIRST_WEIGHT;

    for byte in body.bytes().rev() {
        if !byte.is_ascii_digit() {
            continue;
        }
        seen_digit = true;
        let digit = u32::from(byte - b'0');
        sum = (sum + digit * weight) % 11;
        weight = if weight == LAST_WEIGHT {
            FIRST_WEIGHT
        } else {
            weight + 1
        };
    }

    if !seen_digit {
        return None;
    }

    Some(match 11 - sum {
        11 => '0',
        10 => 'K',
        // 1..=9 here since sum is in 0..=10.
        n => char::from(b'0' + n as u8),
    })
}

/// Verifies that `check` is the check character of `body`.
///
/// The comparison is ASCII case-insensitive so a lowercase `'k'` is
/// accepted. Returns `false` when no check character can be computed.
///
/// # Examples
///
/// ```
/// use rutkit_core::check_digit::mod11_verify;
///
/// assert!(mod11_verify("12345678", '5'));
/// assert!(mod11_verify("12345670", 'k'));
/// assert!(!mod11_verify("12345678", '9'));
/// ```
pub fn mod11_verify(body: &str, check: char) -> bool {
    mod11_check_char(body).is_some_and(|expected| expected.eq_ignore_ascii_case(&check))
}
