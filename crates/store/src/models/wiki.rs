//! Read and write views of wiki pages.

use crate::history::{CommitRecord, Signature};

/// Listing entry: a page and the newest commit that touched it.
#[derive(Debug, Clone)]
pub struct WikiPageSummary {
    pub title: String,
    pub file_name: String,
    pub last_commit: CommitRecord,
}

/// A page with its content and history size, plus the raw sidebar and
/// footer pages of the same wiki when they exist.
#[derive(Debug, Clone)]
pub struct WikiPageView {
    pub title: String,
    pub file_name: String,
    pub content: Vec<u8>,
    pub last_commit: CommitRecord,
    pub commit_count: usize,
    pub sidebar: Option<Vec<u8>>,
    pub footer: Option<Vec<u8>>,
}

/// DTO for creating a page.
#[derive(Debug, Clone)]
pub struct CreateWikiPage {
    pub title: String,
    pub content: Vec<u8>,
    pub message: String,
    pub signature: Signature,
}

/// DTO for editing (and optionally renaming) a page.
#[derive(Debug, Clone)]
pub struct UpdateWikiPage {
    /// Title after the edit. `None` keeps the current title.
    pub title: Option<String>,
    pub content: Vec<u8>,
    /// Blank falls back to `Update "<title>"` for the resulting title.
    pub message: String,
    pub signature: Signature,
}

/// Outcome of an edit: the page as committed and the title it had before.
#[derive(Debug, Clone)]
pub struct UpdatedWikiPage {
    pub previous_title: String,
    pub page: WikiPageView,
}

/// DTO for deleting a page.
#[derive(Debug, Clone)]
pub struct DeleteWikiPage {
    /// Blank falls back to `Delete page "<title>"`.
    pub message: String,
    pub signature: Signature,
}

/// Outcome of a delete.
#[derive(Debug, Clone)]
pub struct DeletedWikiPage {
    pub title: String,
    pub commit: CommitRecord,
}
