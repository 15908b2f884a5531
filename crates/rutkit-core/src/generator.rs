//! Identifier generators for test data.
//!
//! Everything here draws from a caller-supplied [`StdRng`] so output is
//! reproducible from a seed. [`generate_batch`] seeds from entropy when no
//! seed is given.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::check_digit::mod11_check_char;
use crate::codec::{IdentityNumberCodec, MAX_GENERATED_BODY, MIN_GENERATED_BODY};
use crate::rut::Rut;

/// Every character that can appear as a check character.
const CHECK_CHARS: &[u8] = b"0123456789K";

/// Generates a valid [`Rut`] with a body uniform over the generator range.
pub fn gen_rut(rng: &mut StdRng) -> Rut {
    let body = rng
        .gen_range(MIN_GENERATED_BODY..=MAX_GENERATED_BODY)
        .to_string();
    // The body is all digits, so a check character always exists.
    let check = mod11_check_char(&body).unwrap_or('0');
    Rut::from_validated(body, check)
}

/// Generates a well-shaped identifier whose check character is wrong.
///
/// Returned in display format. Useful for exercising rejection paths.
pub fn gen_wrong_check(rng: &mut StdRng) -> String {
    let rut = gen_rut(rng);
    let offset = rng.gen_range(1..CHECK_CHARS.len());
    let current = CHECK_CHARS
        .iter()
        .position(|&c| char::from(c) == rut.check())
        .unwrap_or(0);
    let wrong = char::from(CHECK_CHARS[(current + offset) % CHECK_CHARS.len()]);
    IdentityNumberCodec::new().format(&format!("{}{wrong}", rut.body()))
}

/// Endless stream of valid identifiers.
///
/// With `Some(seed)` the output is deterministic; with `None` the RNG is
/// seeded from OS entropy. Nothing is produced until the iterator is
/// pulled, so callers bound it with `take`.
pub fn generate_iter(seed: Option<u64>) -> impl Iterator<Item = Rut> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    std::iter::repeat_with(move || gen_rut(&mut rng))
}

/// Generates `count` valid identifiers into a `Vec`.
///
/// Same sequence as [`generate_iter`] for the same seed. Prefer the
/// iterator when `count` comes from user input.
pub fn generate_batch(count: usize, seed: Option<u64>) -> Vec<Rut> {
    generate_iter(seed).take(count).collect()
}
