use forgewiki_core::types::DbId;

/// A code repository. The wiki itself is held separately by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: DbId,
    pub owner: String,
    pub name: String,
    pub is_private: bool,
    /// Whether the wiki has at least one commit.
    pub has_wiki: bool,
}

impl Repository {
    pub fn matches(&self, owner: &str, name: &str) -> bool {
        self.owner.eq_ignore_ascii_case(owner) && self.name.eq_ignore_ascii_case(name)
    }
}

/// DTO for creating a repository.
#[derive(Debug, Clone)]
pub struct CreateRepository {
    pub owner: String,
    pub name: String,
    pub is_private: bool,
}
