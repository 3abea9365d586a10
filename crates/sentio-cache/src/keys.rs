//! Cache key derivation.

use sha2::{Digest, Sha256};

/// Normalize text for consistent fingerprints: case-fold, trim, and collapse
/// internal whitespace runs to single spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the cache key for a piece of text.
///
/// Hex SHA-256 over the normalized text: fixed-length regardless of input
/// size (inputs can reach 1 MiB), deterministic across process restarts,
/// negligible collision probability.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(text).as_bytes());
    hex::encode(hasher.finalize())
}
