use forgewiki_core::types::DbId;

use crate::error::StoreError;
use crate::models::user::{CreateUser, User};
use crate::Store;

/// Provides create and lookup operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user. Logins are unique, compared case-insensitively.
    pub async fn create(store: &Store, input: &CreateUser) -> Result<User, StoreError> {
        let mut users = store.users.write().await;
        if users.iter().any(|u| u.login.eq_ignore_ascii_case(&input.login)) {
            return Err(StoreError::UserExists(input.login.clone()));
        }
        let user = User {
            id: store.allocate_id(),
            login: input.login.clone(),
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            is_admin: input.is_admin,
        };
        users.push(user.clone());
        Ok(user)
    }

    pub async fn find_by_id(store: &Store, id: DbId) -> Option<User> {
        store.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    pub async fn find_by_login(store: &Store, login: &str) -> Option<User> {
        store
            .users
            .read()
            .await
            .iter()
            .find(|u| u.login.eq_ignore_ascii_case(login))
            .cloned()
    }
}
