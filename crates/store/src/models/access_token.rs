use forgewiki_core::types::{DbId, Timestamp};

/// A stored API token. Only the SHA-256 hash of the plaintext is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub token_hash: String,
    pub token_last_eight: String,
    pub created_at: Timestamp,
}

/// DTO for storing a newly issued token.
#[derive(Debug, Clone)]
pub struct CreateAccessToken {
    pub user_id: DbId,
    pub name: String,
    pub token_hash: String,
    pub token_last_eight: String,
}
