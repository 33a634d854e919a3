use crate::error::StoreError;
use crate::models::repository::{CreateRepository, Repository};
use crate::{RepositoryEntry, Store};

/// Provides create and lookup operations for repositories.
pub struct RepositoryRepo;

impl RepositoryRepo {
    /// Create a repository with no wiki.
    pub async fn create(store: &Store, input: &CreateRepository) -> Result<Repository, StoreError> {
        let mut repositories = store.repositories.write().await;
        if repositories
            .iter()
            .any(|e| e.repo.matches(&input.owner, &input.name))
        {
            return Err(StoreError::RepositoryExists {
                owner: input.owner.clone(),
                name: input.name.clone(),
            });
        }
        let repo = Repository {
            id: store.allocate_id(),
            owner: input.owner.clone(),
            name: input.name.clone(),
            is_private: input.is_private,
            has_wiki: false,
        };
        repositories.push(RepositoryEntry {
            repo: repo.clone(),
            wiki: None,
        });
        Ok(repo)
    }

    /// Look a repository up by owner and name, case-insensitively.
    pub async fn find(store: &Store, owner: &str, name: &str) -> Option<Repository> {
        store
            .repositories
            .read()
            .await
            .iter()
            .find(|e| e.repo.matches(owner, name))
            .map(|e| Repository {
                has_wiki: e.wiki.as_ref().is_some_and(|w| !w.is_empty()),
                ..e.repo.clone()
            })
    }
}
