//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&Store` as the first argument.

pub mod access_token_repo;
pub mod repository_repo;
pub mod user_repo;
pub mod wiki_repo;

pub use access_token_repo::AccessTokenRepo;
pub use repository_repo::RepositoryRepo;
pub use user_repo::UserRepo;
pub use wiki_repo::WikiRepo;
