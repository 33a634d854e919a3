//! Authentication and authorization extractors.
//!
//! - [`auth::SessionUser`] -- Requires a valid session cookie.
//! - [`auth::TokenUser`] -- Requires a valid API token (wiki writes).
//! - [`auth::MaybeUser`] -- Token or session if present, anonymous otherwise.
//! - [`access`] -- Repository read/write checks.

pub mod access;
pub mod auth;
