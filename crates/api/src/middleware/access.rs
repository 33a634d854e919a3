//! Repository visibility and write-permission checks.

use forgewiki_core::error::CoreError;
use forgewiki_store::models::repository::Repository;
use forgewiki_store::models::user::User;
use forgewiki_store::repositories::RepositoryRepo;
use forgewiki_store::Store;

use crate::error::{AppError, AppResult};

fn is_owner_or_admin(user: &User, repo: &Repository) -> bool {
    user.is_admin || user.login.eq_ignore_ascii_case(&repo.owner)
}

fn repository_not_found(owner: &str, name: &str) -> AppError {
    AppError::Core(CoreError::not_found("repository", format!("{owner}/{name}")))
}

/// Look up a repository the caller may read. Private repositories are
/// reported as missing to everyone but their owner and admins.
pub async fn readable_repository(
    store: &Store,
    viewer: Option<&User>,
    owner: &str,
    name: &str,
) -> AppResult<Repository> {
    let repo = RepositoryRepo::find(store, owner, name)
        .await
        .ok_or_else(|| repository_not_found(owner, name))?;
    if repo.is_private && !viewer.is_some_and(|u| is_owner_or_admin(u, &repo)) {
        return Err(repository_not_found(owner, name));
    }
    Ok(repo)
}

/// Look up a repository the caller may write to.
pub async fn writable_repository(
    store: &Store,
    user: &User,
    owner: &str,
    name: &str,
) -> AppResult<Repository> {
    let repo = readable_repository(store, Some(user), owner, name).await?;
    if !is_owner_or_admin(user, &repo) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{} has no write access to {}/{}",
            user.login, repo.owner, repo.name
        ))));
    }
    Ok(repo)
}
