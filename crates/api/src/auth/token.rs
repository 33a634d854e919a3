//! API tokens used to authorize wiki writes.
//!
//! Tokens are 40 lowercase hex characters. Only their SHA-256 hash is
//! stored, so a leaked store does not leak usable tokens.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a plaintext token in hex characters.
pub const TOKEN_LENGTH: usize = 40;

/// A freshly generated token.
pub struct GeneratedToken {
    /// Returned to the caller exactly once, never stored.
    pub plaintext: String,
    /// SHA-256 hex digest of the plaintext.
    pub hash: String,
    /// Trailing characters kept for display.
    pub last_eight: String,
}

pub fn generate_api_token() -> GeneratedToken {
    let bytes: [u8; TOKEN_LENGTH / 2] = rand::rng().random();
    let plaintext: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let hash = hash_api_token(&plaintext);
    let last_eight = plaintext[TOKEN_LENGTH - 8..].to_string();
    GeneratedToken {
        plaintext,
        hash,
        last_eight,
    }
}

/// Compute the SHA-256 hex digest of a token.
pub fn hash_api_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
