// src/analysis/hasher.rs
//! Content-addressed identity for stored strings.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest
pub const ID_HEX_LEN: usize = 64;

/// Hex SHA-256 of the UTF-8 bytes of `value`. Used both as the record id and as
/// the duplicate-existence key.
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
