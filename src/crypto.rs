//! Hashing primitives for forkchain
//!
//! Every digest in the ledger (transaction leaves, interior Merkle nodes and
//! block self-hashes) goes through [`digest`], so they all share one function.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 output.
pub type HexDigest = String;

/// Number of hex characters in a [`HexDigest`].
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of `data`, lowercase hex encoded.
pub fn digest(data: &[u8]) -> HexDigest {
    hex::encode(Sha256::digest(data))
}

/// Digest of the UTF-8 bytes of a string.
pub fn digest_str(s: &str) -> HexDigest {
    digest(s.as_bytes())
}

/// Digest of several byte slices fed in order, without building an
/// intermediate buffer. Equal to `digest` over their concatenation.
pub fn digest_concat(parts: &[&[u8]]) -> HexDigest {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

/// Returns true when `s` looks like a digest produced by this module.
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
