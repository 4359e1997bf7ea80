//! Content hashing for generated component names.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Stable, deterministic digest of a serialized fragment.
pub trait FragmentHasher {
    /// Lowercase hex digest of `bytes`.
    fn hash(&self, bytes: &[u8]) -> String;
}

/// SHA-256, hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl FragmentHasher for Sha256Hasher {
    fn hash(&self, bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }
}

/// First `len` digits of the digest of `value`'s JSON form.
pub fn fingerprint<T: Serialize>(hasher: &dyn FragmentHasher, value: &T, len: usize) -> String {
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    let mut digest = hasher.hash(&bytes);
    digest.truncate(len);
    digest
}
