//! Random short code and link id generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Number of random bytes behind a link id.
const ID_LENGTH_BYTES: usize = 16;

/// Generates a random short code of `length` characters.
///
/// Characters are drawn uniformly from the 62-symbol alphabet `[A-Za-z0-9]`.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generates an opaque, stable link id as 32 lowercase hex characters.
///
/// Uses `getrandom` for entropy.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_id() -> String {
    let mut buffer = [0u8; ID_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    hex::encode(buffer)
}
