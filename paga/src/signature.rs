//! Request signing and reference-number generation.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha512};

/// Length of the random suffix in generated reference numbers.
const REFERENCE_SUFFIX_LEN: usize = 9;

/// Builds the exact string hashed for a request signature: the given parts
/// concatenated in order with the shared hash key appended.
///
/// Exposed separately from [`compute_signature`] so callers can log or
/// assert on the preimage when diagnosing provider-side rejections.
#[must_use]
pub fn signature_preimage(hash_key: &str, parts: &[&str]) -> String {
    let mut input = String::with_capacity(parts.iter().map(|p| p.len()).sum::<usize>() + hash_key.len());
    for part in parts {
        input.push_str(part);
    }
    input.push_str(hash_key);
    input
}

/// Computes the request signature: lowercase hex SHA-512 of the
/// concatenated parts with the hash key appended.
///
/// Pure function; the result is always 128 hex characters.
#[must_use]
pub fn compute_signature(hash_key: &str, parts: &[&str]) -> String {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hasher.update(hash_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a unique reference number: `{prefix}-{unix_millis}-{suffix}`
/// with a 9-character random alphanumeric suffix.
///
/// The provider treats duplicate reference numbers as replayed transactions,
/// so every request must use a fresh one. The random suffix keeps two calls
/// in the same millisecond distinct; no global counter is needed.
#[must_use]
pub fn new_reference_number(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix = Alphanumeric.sample_string(&mut rand::rng(), REFERENCE_SUFFIX_LEN);
    format!("{prefix}-{millis}-{suffix}")
}
