//! Page-level operations over a repository's wiki history.
//!
//! Write operations hold the repositories write lock for their whole
//! resolve-check-commit sequence, so concurrent edits serialize.

use forgewiki_core::wiki::{
    candidate_file_names, compare_titles, default_delete_message, default_update_message,
    file_name_to_title, is_listed_page, message_or, page_file_name, FOOTER_TITLE, SIDEBAR_TITLE,
};

use crate::error::StoreError;
use crate::history::{Change, CommitDraft, CommitRecord, WikiHistory};
use crate::models::wiki::{
    CreateWikiPage, DeleteWikiPage, DeletedWikiPage, UpdateWikiPage, UpdatedWikiPage,
    WikiPageSummary, WikiPageView,
};
use crate::{RepositoryEntry, Store};

/// Provides page listing, lookup, history and mutation for wikis.
pub struct WikiRepo;

impl WikiRepo {
    /// All listed pages, ordered by title (case-insensitive).
    pub async fn list_pages(
        store: &Store,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<WikiPageSummary>, StoreError> {
        let repositories = store.repositories.read().await;
        let wiki = existing_wiki(find_entry(&repositories, owner, repo)?)?;

        let mut pages: Vec<WikiPageSummary> = wiki
            .paths()
            .filter(|path| is_listed_page(path))
            .filter_map(|path| {
                Some(WikiPageSummary {
                    title: file_name_to_title(path)?,
                    file_name: path.to_string(),
                    last_commit: wiki.last_commit(path)?.clone(),
                })
            })
            .collect();
        pages.sort_by(|a, b| compare_titles(&a.title, &b.title));
        Ok(pages)
    }

    /// Resolve a page by title or sub-URL.
    pub async fn find_page(
        store: &Store,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> Result<WikiPageView, StoreError> {
        let repositories = store.repositories.read().await;
        let wiki = existing_wiki(find_entry(&repositories, owner, repo)?)?;
        let file = resolve_page(wiki, name).ok_or_else(|| StoreError::PageNotFound(name.into()))?;
        page_view(wiki, &file).ok_or_else(|| StoreError::PageNotFound(name.into()))
    }

    /// Commits that touched a page, newest first.
    pub async fn revisions(
        store: &Store,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> Result<Vec<CommitRecord>, StoreError> {
        let repositories = store.repositories.read().await;
        let wiki = existing_wiki(find_entry(&repositories, owner, repo)?)?;
        let file = resolve_page(wiki, name).ok_or_else(|| StoreError::PageNotFound(name.into()))?;
        Ok(wiki.revisions(&file).into_iter().cloned().collect())
    }

    /// Create a page. The first page of a repository initializes its wiki.
    pub async fn create_page(
        store: &Store,
        owner: &str,
        repo: &str,
        input: &CreateWikiPage,
    ) -> Result<WikiPageView, StoreError> {
        let mut repositories = store.repositories.write().await;
        let entry = find_entry_mut(&mut repositories, owner, repo)?;
        let wiki = entry.wiki.get_or_insert_with(WikiHistory::new);

        if resolve_page(wiki, &input.title).is_some() {
            return Err(StoreError::PageExists(input.title.clone()));
        }

        let file = page_file_name(&input.title);
        let commit = wiki.commit(CommitDraft {
            author: input.signature.clone(),
            committer: input.signature.clone(),
            message: input.message.clone(),
            changes: vec![Change::Write {
                path: file.clone(),
                content: input.content.clone(),
            }],
        });
        tracing::debug!(%owner, %repo, %file, commit = %commit.id, "Wiki page created");

        page_view(wiki, &file).ok_or_else(|| StoreError::PageNotFound(input.title.clone()))
    }

    /// Replace a page's content, renaming it when `input.title` differs
    /// from its current title. The current title and the default message
    /// are resolved under the same lock as the commit.
    pub async fn update_page(
        store: &Store,
        owner: &str,
        repo: &str,
        name: &str,
        input: &UpdateWikiPage,
    ) -> Result<UpdatedWikiPage, StoreError> {
        let mut repositories = store.repositories.write().await;
        let wiki = existing_wiki_mut(find_entry_mut(&mut repositories, owner, repo)?)?;
        let current = resolve_page(wiki, name).ok_or_else(|| StoreError::PageNotFound(name.into()))?;
        let previous_title =
            file_name_to_title(&current).ok_or_else(|| StoreError::PageNotFound(name.into()))?;

        let title = input.title.clone().unwrap_or_else(|| previous_title.clone());
        let target = if title != previous_title {
            let taken = resolve_page(wiki, &title).is_some_and(|existing| existing != current);
            if taken {
                return Err(StoreError::PageExists(title));
            }
            page_file_name(&title)
        } else {
            current.clone()
        };

        let mut changes = Vec::with_capacity(2);
        if target != current {
            changes.push(Change::Delete {
                path: current.clone(),
            });
        }
        changes.push(Change::Write {
            path: target.clone(),
            content: input.content.clone(),
        });

        let commit = wiki.commit(CommitDraft {
            author: input.signature.clone(),
            committer: input.signature.clone(),
            message: message_or(&input.message, || default_update_message(&title)),
            changes,
        });
        tracing::debug!(%owner, %repo, from = %current, to = %target, commit = %commit.id, "Wiki page updated");

        let page = page_view(wiki, &target).ok_or_else(|| StoreError::PageNotFound(title.clone()))?;
        Ok(UpdatedWikiPage {
            previous_title,
            page,
        })
    }

    /// Remove a page from the head of the wiki. Its history is kept.
    pub async fn delete_page(
        store: &Store,
        owner: &str,
        repo: &str,
        name: &str,
        input: &DeleteWikiPage,
    ) -> Result<DeletedWikiPage, StoreError> {
        let mut repositories = store.repositories.write().await;
        let wiki = existing_wiki_mut(find_entry_mut(&mut repositories, owner, repo)?)?;
        let file = resolve_page(wiki, name).ok_or_else(|| StoreError::PageNotFound(name.into()))?;
        let title = file_name_to_title(&file).ok_or_else(|| StoreError::PageNotFound(name.into()))?;

        let commit = wiki.commit(CommitDraft {
            author: input.signature.clone(),
            committer: input.signature.clone(),
            message: message_or(&input.message, || default_delete_message(&title)),
            changes: vec![Change::Delete { path: file.clone() }],
        });
        tracing::debug!(%owner, %repo, %file, commit = %commit.id, "Wiki page deleted");
        Ok(DeletedWikiPage { title, commit })
    }

    /// Replay a historical commit with a fixed id (fixture loading).
    pub async fn import_commit(
        store: &Store,
        owner: &str,
        repo: &str,
        id: &str,
        draft: CommitDraft,
    ) -> Result<CommitRecord, StoreError> {
        let mut repositories = store.repositories.write().await;
        let entry = find_entry_mut(&mut repositories, owner, repo)?;
        entry.wiki.get_or_insert_with(WikiHistory::new).import(id, draft)
    }
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

fn repository_not_found(owner: &str, repo: &str) -> StoreError {
    StoreError::RepositoryNotFound {
        owner: owner.into(),
        name: repo.into(),
    }
}

fn find_entry<'a>(
    entries: &'a [RepositoryEntry],
    owner: &str,
    repo: &str,
) -> Result<&'a RepositoryEntry, StoreError> {
    entries
        .iter()
        .find(|e| e.repo.matches(owner, repo))
        .ok_or_else(|| repository_not_found(owner, repo))
}

fn find_entry_mut<'a>(
    entries: &'a mut [RepositoryEntry],
    owner: &str,
    repo: &str,
) -> Result<&'a mut RepositoryEntry, StoreError> {
    entries
        .iter_mut()
        .find(|e| e.repo.matches(owner, repo))
        .ok_or_else(|| repository_not_found(owner, repo))
}

fn wiki_not_found(entry: &RepositoryEntry) -> StoreError {
    StoreError::WikiNotFound {
        owner: entry.repo.owner.clone(),
        name: entry.repo.name.clone(),
    }
}

fn existing_wiki(entry: &RepositoryEntry) -> Result<&WikiHistory, StoreError> {
    match &entry.wiki {
        Some(wiki) if !wiki.is_empty() => Ok(wiki),
        _ => Err(wiki_not_found(entry)),
    }
}

fn existing_wiki_mut(entry: &mut RepositoryEntry) -> Result<&mut WikiHistory, StoreError> {
    let missing = wiki_not_found(entry);
    match entry.wiki.as_mut() {
        Some(wiki) if !wiki.is_empty() => Ok(wiki),
        _ => Err(missing),
    }
}

/// File currently holding the page `name`, trying the escaped name first.
fn resolve_page(wiki: &WikiHistory, name: &str) -> Option<String> {
    candidate_file_names(name)
        .into_iter()
        .find(|candidate| wiki.contains(candidate))
}

fn page_view(wiki: &WikiHistory, file: &str) -> Option<WikiPageView> {
    let content = wiki.file(file)?.to_vec();
    let last_commit = wiki.last_commit(file)?.clone();
    let extra = |title: &str| {
        resolve_page(wiki, title).and_then(|f| wiki.file(&f).map(<[u8]>::to_vec))
    };
    Some(WikiPageView {
        title: file_name_to_title(file)?,
        file_name: file.to_string(),
        content,
        last_commit,
        commit_count: wiki.commit_count(file),
        sidebar: extra(SIDEBAR_TITLE),
        footer: extra(FOOTER_TITLE),
    })
}
