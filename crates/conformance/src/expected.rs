//! Literal values of the fixture wiki in `user2/repo1`.

use forgewiki_core::structs::{CommitUser, WikiCommit, WikiCommitList};

pub const HOME_TITLE: &str = "Home";
pub const HOME_CONTENT: &[u8] = b"# Home page\n\nThis is the home page!\n";
pub const HOME_COMMIT_ID: &str = "2c54faec6c45d31c1abfaecdab471eac6633738a";

pub const NEW_PAGE_TITLE: &str = "New page";
pub const SYMBOLIC_TITLE: &str = "&&&&";
pub const NEW_PAGE_CONTENT: &[u8] = b"Wiki page content for API unit tests";

pub const RENAME_SOURCE: &str = "Page-With-Spaced-Name";
pub const RENAME_TARGET: &str = "edited title";
pub const EDITED_CONTENT: &[u8] = b"Edited wiki page content for API unit tests";

/// A seeded page as the listing reports it.
#[derive(Debug, Clone)]
pub struct SeededPage {
    pub title: &'static str,
    pub sub_url: &'static str,
    pub last_commit: WikiCommit,
    /// Page body, where the fixture publishes it.
    pub content: Option<&'static [u8]>,
}

fn fixture_commit(id: &str, name: &str, email: &str, date: &str, message: &str) -> WikiCommit {
    let user = CommitUser::new(name, email, date);
    WikiCommit {
        id: id.to_string(),
        author: user.clone(),
        committer: user,
        message: message.to_string(),
    }
}

/// The commit that added `Home.md`.
pub fn home_commit() -> WikiCommit {
    fixture_commit(
        HOME_COMMIT_ID,
        "Ethan Koenig",
        "ethantkoenig@gmail.com",
        "2017-11-27T04:31:18Z",
        "Add Home.md\n",
    )
}

/// Every seeded page, in listing order.
pub fn seeded_pages() -> Vec<SeededPage> {
    vec![
        SeededPage {
            title: "Home",
            sub_url: "Home",
            last_commit: home_commit(),
            content: Some(HOME_CONTENT),
        },
        SeededPage {
            title: "Page With Image",
            sub_url: "Page-With-Image",
            last_commit: fixture_commit(
                "0cf15c3f66ec8384480ed9c3cf87c9e97fbb0ec3",
                "Gabriel Silva Simões",
                "simoes.sgabriel@gmail.com",
                "2019-01-25T01:41:55Z",
                "Add jpeg.jpg and page with image\n",
            ),
            content: None,
        },
        SeededPage {
            title: "Page With Spaced Name",
            sub_url: "Page-With-Spaced-Name",
            last_commit: fixture_commit(
                "c10d10b7e655b3dab1f53176db57c8219a5488d6",
                "Gabriel Silva Simões",
                "simoes.sgabriel@gmail.com",
                "2019-01-25T01:39:51Z",
                "Add page with spaced name\n",
            ),
            content: None,
        },
        SeededPage {
            title: "Unescaped File",
            sub_url: "Unescaped-File",
            last_commit: fixture_commit(
                "0dca5bd9b5d7ef937710e056f575e86c0184ba85",
                "6543",
                "6543@obermui.de",
                "2021-07-19T16:42:46Z",
                "add unescaped file\n",
            ),
            content: None,
        },
    ]
}

/// Revision history of `Home`.
pub fn home_revisions() -> WikiCommitList {
    WikiCommitList {
        commits: vec![home_commit()],
        count: 1,
    }
}
