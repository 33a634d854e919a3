/// Errors raised by the repository structs.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("repository {owner}/{name} does not exist")]
    RepositoryNotFound { owner: String, name: String },

    #[error("repository {owner}/{name} already exists")]
    RepositoryExists { owner: String, name: String },

    #[error("repository {owner}/{name} has no wiki")]
    WikiNotFound { owner: String, name: String },

    #[error("wiki page '{0}' does not exist")]
    PageNotFound(String),

    #[error("wiki page '{0}' already exists")]
    PageExists(String),

    #[error("user '{0}' already exists")]
    UserExists(String),

    #[error("access token '{0}' already exists")]
    TokenExists(String),

    #[error("commit {0} already exists in the wiki history")]
    CommitExists(String),
}
