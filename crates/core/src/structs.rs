//! JSON wire types of the wiki REST surface.
//!
//! These are shared verbatim by the service (serialization) and the
//! conformance harness (deserialization + equality assertions), so every
//! type derives `PartialEq`.

use serde::{Deserialize, Serialize};

use crate::content::encode_content_padded;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Commits
-------------------------------------------------------------------------- */

/// Author or committer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// An identity plus the RFC 3339 UTC date it acted at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitUser {
    #[serde(flatten)]
    pub identity: Identity,
    pub date: String,
}

impl CommitUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            identity: Identity {
                name: name.into(),
                email: email.into(),
            },
            date: date.into(),
        }
    }
}

/// A commit that touched a wiki page.
///
/// The committer is published under `commiter`, the established field name
/// of this API family; `committer` is accepted when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiCommit {
    #[serde(rename = "sha")]
    pub id: String,
    pub author: CommitUser,
    #[serde(rename = "commiter", alias = "committer")]
    pub committer: CommitUser,
    pub message: String,
}

/// Revision history of a single page, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiCommitList {
    pub commits: Vec<WikiCommit>,
    pub count: i64,
}

/* --------------------------------------------------------------------------
Pages
-------------------------------------------------------------------------- */

/// Page listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPageMetaData {
    pub title: String,
    pub html_url: String,
    pub sub_url: String,
    pub last_commit: WikiCommit,
}

/// A full page: metadata, unpadded base64 content, history size and the
/// unpadded base64 content of the sidebar and footer pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPage {
    #[serde(flatten)]
    pub meta: WikiPageMetaData,
    pub content_base64: String,
    pub commit_count: i64,
    pub sidebar: String,
    pub footer: String,
}

/// Request body for creating and editing a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateWikiPageOptions {
    pub title: String,
    pub content_base64: String,
    pub message: String,
}

impl CreateWikiPageOptions {
    /// Build options from raw content, encoding it as padded base64.
    pub fn new(title: impl Into<String>, content: &[u8]) -> Self {
        Self {
            title: title.into(),
            content_base64: encode_content_padded(content),
            message: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/* --------------------------------------------------------------------------
Auth
-------------------------------------------------------------------------- */

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public user info returned by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: DbId,
    pub login: String,
    pub full_name: String,
    pub email: String,
}

/// Request body for `POST /users/{username}/tokens`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccessTokenOption {
    pub name: String,
}

/// A freshly issued API token. `sha1` holds the plaintext token and is
/// only ever returned once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub id: DbId,
    pub name: String,
    pub sha1: String,
    pub token_last_eight: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn home_commit() -> WikiCommit {
        let user = CommitUser::new("Ethan Koenig", "ethantkoenig@gmail.com", "2017-11-27T04:31:18Z");
        WikiCommit {
            id: "2c54faec6c45d31c1abfaecdab471eac6633738a".into(),
            author: user.clone(),
            committer: user,
            message: "Add Home.md\n".into(),
        }
    }

    #[test]
    fn commit_uses_wire_field_names() {
        let json = serde_json::to_value(home_commit()).unwrap();
        assert_eq!(json["sha"], "2c54faec6c45d31c1abfaecdab471eac6633738a");
        assert_eq!(json["author"]["name"], "Ethan Koenig");
        assert_eq!(json["author"]["date"], "2017-11-27T04:31:18Z");
        assert_eq!(json["commiter"]["email"], "ethantkoenig@gmail.com");
        assert!(json.get("committer").is_none());
    }

    #[test]
    fn commit_accepts_correctly_spelt_committer() {
        let json = serde_json::json!({
            "sha": "2c54faec6c45d31c1abfaecdab471eac6633738a",
            "author": {"name": "Ethan Koenig", "email": "ethantkoenig@gmail.com", "date": "2017-11-27T04:31:18Z"},
            "committer": {"name": "Ethan Koenig", "email": "ethantkoenig@gmail.com", "date": "2017-11-27T04:31:18Z"},
            "message": "Add Home.md\n",
        });
        let commit: WikiCommit = serde_json::from_value(json).unwrap();
        assert_eq!(commit, home_commit());
    }

    #[test]
    fn page_flattens_metadata() {
        let page = WikiPage {
            meta: WikiPageMetaData {
                title: "Home".into(),
                html_url: "http://localhost:3000/user2/repo1/wiki/Home".into(),
                sub_url: "Home".into(),
                last_commit: home_commit(),
            },
            content_base64: "IyBIb21lIHBhZ2UKClRoaXMgaXMgdGhlIGhvbWUgcGFnZSEK".into(),
            commit_count: 1,
            sidebar: String::new(),
            footer: String::new(),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["title"], "Home");
        assert_eq!(json["sub_url"], "Home");
        assert_eq!(json["last_commit"]["sha"], "2c54faec6c45d31c1abfaecdab471eac6633738a");
        assert_eq!(json["commit_count"], 1);

        let back: WikiPage = serde_json::from_value(json).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn create_options_default_missing_fields() {
        let opts: CreateWikiPageOptions =
            serde_json::from_value(serde_json::json!({"title": "New page"})).unwrap();
        assert_eq!(opts.title, "New page");
        assert!(opts.content_base64.is_empty());
        assert!(opts.message.is_empty());
    }

    #[test]
    fn create_options_encode_padded_content() {
        let opts = CreateWikiPageOptions::new("edited title", b"Edited wiki page content for API unit tests");
        assert!(opts.content_base64.ends_with("=="));
    }
}
