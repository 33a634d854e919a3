//! Entity structs and the DTOs used to create them.

pub mod access_token;
pub mod repository;
pub mod user;
pub mod wiki;
