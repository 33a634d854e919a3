use forgewiki_core::types::DbId;

use crate::error::StoreError;
use crate::models::access_token::{AccessTokenRecord, CreateAccessToken};
use crate::Store;

/// Provides create and lookup operations for API tokens.
pub struct AccessTokenRepo;

impl AccessTokenRepo {
    /// Store a token hash. Token names are unique per user.
    pub async fn create(
        store: &Store,
        input: &CreateAccessToken,
    ) -> Result<AccessTokenRecord, StoreError> {
        let mut tokens = store.tokens.write().await;
        if tokens
            .iter()
            .any(|t| t.user_id == input.user_id && t.name == input.name)
        {
            return Err(StoreError::TokenExists(input.name.clone()));
        }
        let record = AccessTokenRecord {
            id: store.allocate_id(),
            user_id: input.user_id,
            name: input.name.clone(),
            token_hash: input.token_hash.clone(),
            token_last_eight: input.token_last_eight.clone(),
            created_at: chrono::Utc::now(),
        };
        tokens.push(record.clone());
        Ok(record)
    }

    pub async fn find_by_hash(store: &Store, token_hash: &str) -> Option<AccessTokenRecord> {
        store
            .tokens
            .read()
            .await
            .iter()
            .find(|t| t.token_hash == token_hash)
            .cloned()
    }

    pub async fn list_by_user(store: &Store, user_id: DbId) -> Vec<AccessTokenRecord> {
        store
            .tokens
            .read()
            .await
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }
}
