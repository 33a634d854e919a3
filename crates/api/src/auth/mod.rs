//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- Signed session cookies issued at login.
//! - [`token`] -- API token generation and hashing.

pub mod password;
pub mod session;
pub mod token;
