//! Wiki page naming, title validation, listing order, pagination and
//! default commit messages.
//!
//! A page titled `Page With Spaced Name` has the sub-URL
//! `Page-With-Spaced-Name` and lives in the file `Page-With-Spaced-Name.md`.
//! Older wikis may store the title literally (`Unescaped File.md`); lookups
//! fall back to that form.

use std::cmp::Ordering;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Extension of files that hold wiki pages.
pub const PAGE_EXTENSION: &str = ".md";

/// Title of the page rendered as every page's sidebar.
pub const SIDEBAR_TITLE: &str = "_Sidebar";

/// Title of the page rendered as every page's footer.
pub const FOOTER_TITLE: &str = "_Footer";

/// Page names that collide with wiki routes of the web UI.
pub const RESERVED_NAMES: &[&str] = &["_pages", "_new", "_edit", "raw"];

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Default number of pages per listing page.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Maximum number of pages per listing page.
pub const MAX_PAGE_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Name mapping
// ---------------------------------------------------------------------------

/// URL-safe form of a title: ASCII spaces become hyphens.
pub fn sub_url(title: &str) -> String {
    title.replace(' ', "-")
}

/// File name that stores the page with the given title or sub-URL.
pub fn page_file_name(name: &str) -> String {
    format!("{}{PAGE_EXTENSION}", sub_url(name))
}

/// Recover a page title from its file name. Returns `None` for files that
/// are not pages (attachments such as images).
pub fn file_name_to_title(file_name: &str) -> Option<String> {
    file_name
        .strip_suffix(PAGE_EXTENSION)
        .filter(|stem| !stem.is_empty())
        .map(|stem| stem.replace('-', " "))
}

/// File names to try, in order, when resolving a page name taken from a
/// request path. The name may be a title or a sub-URL.
pub fn candidate_file_names(name: &str) -> Vec<String> {
    let escaped = page_file_name(name);
    let legacy = format!("{}{PAGE_EXTENSION}", name.replace('-', " "));
    if legacy == escaped {
        vec![escaped]
    } else {
        vec![escaped, legacy]
    }
}

/// Whether a file should appear in the page listing.
pub fn is_listed_page(file_name: &str) -> bool {
    match file_name_to_title(file_name) {
        Some(title) => title != SIDEBAR_TITLE && title != FOOTER_TITLE,
        None => false,
    }
}

/// Absolute browser URL of a page.
pub fn html_url(app_url: &str, owner: &str, repo: &str, sub_url: &str) -> String {
    format!(
        "{}/{owner}/{repo}/wiki/{}",
        app_url.trim_end_matches('/'),
        urlencoding::encode(sub_url)
    )
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a page title supplied by a client.
///
/// Any character is allowed except `/` and control characters, so titles
/// such as `&&&&` are stored verbatim.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Wiki page title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Wiki page title must not exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    if title.contains('/') || title.chars().any(char::is_control) {
        return Err(CoreError::Validation(format!(
            "Wiki page title '{title}' contains invalid characters"
        )));
    }
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(&sub_url(title)))
    {
        return Err(CoreError::Validation(format!(
            "Wiki page name '{title}' is reserved"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Ordering and pagination
// ---------------------------------------------------------------------------

/// Listing order: case-insensitive ascending, ties broken case-sensitively.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Clamp a user-provided page size into `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

/// Offset of a 1-based page number. Pages below 1 are treated as 1; page
/// numbers too large to address saturate past the end of any listing.
pub fn page_offset(page: Option<i64>, limit: i64) -> i64 {
    (page.unwrap_or(1).max(1) - 1).saturating_mul(limit)
}

// ---------------------------------------------------------------------------
// Default commit messages
// ---------------------------------------------------------------------------

pub fn default_create_message(title: &str) -> String {
    format!("Add {title:?}")
}

pub fn default_update_message(title: &str) -> String {
    format!("Update {title:?}")
}

pub fn default_delete_message(title: &str) -> String {
    format!("Delete page {title:?}")
}

/// Use the client's message unless it is blank.
pub fn message_or(message: &str, fallback: impl FnOnce() -> String) -> String {
    if message.trim().is_empty() {
        fallback()
    } else {
        message.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
