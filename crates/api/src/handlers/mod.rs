pub mod admin;
pub mod auth;
pub mod tokens;
pub mod wiki;
