//! In-memory storage for users, access tokens, repositories and their
//! commit-addressed wiki histories.
//!
//! The store is shared as a [`DbPool`] (`Arc<Store>`); all access goes
//! through the zero-sized repository structs in [`repositories`].

pub mod error;
pub mod history;
pub mod models;
pub mod repositories;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::history::WikiHistory;
use crate::models::access_token::AccessTokenRecord;
use crate::models::repository::Repository;
use crate::models::user::User;

pub use error::StoreError;

pub type DbPool = Arc<Store>;

/// A repository row together with its wiki history, if the wiki exists.
#[derive(Debug)]
pub(crate) struct RepositoryEntry {
    pub repo: Repository,
    pub wiki: Option<WikiHistory>,
}

/// Backing state for every repository struct.
///
/// Lock order when more than one lock is held: users, tokens, repositories.
#[derive(Debug, Default)]
pub struct Store {
    pub(crate) users: RwLock<Vec<User>>,
    pub(crate) tokens: RwLock<Vec<AccessTokenRecord>>,
    pub(crate) repositories: RwLock<Vec<RepositoryEntry>>,
    next_id: AtomicI64,
}

impl Store {
    pub(crate) fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Drop all users, tokens and repositories and restart id allocation.
    pub async fn clear(&self) {
        let mut users = self.users.write().await;
        let mut tokens = self.tokens.write().await;
        let mut repositories = self.repositories.write().await;
        users.clear();
        tokens.clear();
        repositories.clear();
        self.next_id.store(0, Ordering::Relaxed);
        tracing::debug!("Store cleared");
    }
}

/// Create an empty store.
pub fn create_pool() -> DbPool {
    Arc::new(Store::default())
}
