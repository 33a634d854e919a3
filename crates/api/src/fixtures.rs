//! Fixture data seeded at startup and on `POST /admin/fixtures/reset`.
//!
//! `user2/repo1` replays its historical wiki commits with their literal ids,
//! so clients can assert exact commit metadata.

use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use forgewiki_store::history::{Change, CommitDraft, Signature};
use forgewiki_store::models::repository::CreateRepository;
use forgewiki_store::models::user::CreateUser;
use forgewiki_store::models::wiki::CreateWikiPage;
use forgewiki_store::repositories::{RepositoryRepo, UserRepo, WikiRepo};
use forgewiki_store::Store;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Password shared by every fixture user.
pub const FIXTURE_PASSWORD: &str = "password";

pub const HOME_CONTENT: &[u8] = b"# Home page\n\nThis is the home page!\n";
pub const SPACED_NAME_CONTENT: &[u8] = b"# Page With Spaced Name\n\nThis page has spaces in its name.\n";
pub const IMAGE_PAGE_CONTENT: &[u8] = b"# Page With Image\n\n![jpeg](jpeg.jpg)\n";
pub const UNESCAPED_CONTENT: &[u8] = b"# Unescaped File\n\nStored under a file name with a literal space.\n";
pub const PRIVATE_HOME_CONTENT: &[u8] = b"# Private home\n\nOnly the owner can read this.\n";

/// JPEG start-of-image marker plus a JFIF header stub.
const JPEG_BYTES: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
];

static PASSWORD_HASH: OnceLock<String> = OnceLock::new();

fn fixture_password_hash() -> AppResult<String> {
    if let Some(hash) = PASSWORD_HASH.get() {
        return Ok(hash.clone());
    }
    let hash = hash_password(FIXTURE_PASSWORD)
        .map_err(|e| AppError::InternalError(format!("Failed to hash fixture password: {e}")))?;
    Ok(PASSWORD_HASH.get_or_init(|| hash).clone())
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> AppResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .ok_or_else(|| AppError::InternalError("Invalid fixture timestamp".into()))
}

fn signature(name: &str, email: &str, when: DateTime<Utc>) -> Signature {
    Signature {
        name: name.into(),
        email: email.into(),
        when,
    }
}

fn write(path: &str, content: &[u8]) -> Change {
    Change::Write {
        path: path.into(),
        content: content.to_vec(),
    }
}

/// The historical commits of `user2/repo1`, oldest first.
fn repo1_history() -> AppResult<Vec<(&'static str, CommitDraft)>> {
    let ethan = signature(
        "Ethan Koenig",
        "ethantkoenig@gmail.com",
        at(2017, 11, 27, 4, 31, 18)?,
    );
    let gabriel_first = signature(
        "Gabriel Silva Simões",
        "simoes.sgabriel@gmail.com",
        at(2019, 1, 25, 1, 39, 51)?,
    );
    let gabriel_second = signature(
        "Gabriel Silva Simões",
        "simoes.sgabriel@gmail.com",
        at(2019, 1, 25, 1, 41, 55)?,
    );
    let n6543 = signature("6543", "6543@obermui.de", at(2021, 7, 19, 16, 42, 46)?);

    Ok(vec![
        (
            "2c54faec6c45d31c1abfaecdab471eac6633738a",
            CommitDraft {
                author: ethan.clone(),
                committer: ethan,
                message: "Add Home.md\n".into(),
                changes: vec![write("Home.md", HOME_CONTENT)],
            },
        ),
        (
            "c10d10b7e655b3dab1f53176db57c8219a5488d6",
            CommitDraft {
                author: gabriel_first.clone(),
                committer: gabriel_first,
                message: "Add page with spaced name\n".into(),
                changes: vec![write("Page-With-Spaced-Name.md", SPACED_NAME_CONTENT)],
            },
        ),
        (
            "0cf15c3f66ec8384480ed9c3cf87c9e97fbb0ec3",
            CommitDraft {
                author: gabriel_second.clone(),
                committer: gabriel_second,
                message: "Add jpeg.jpg and page with image\n".into(),
                changes: vec![
                    write("jpeg.jpg", JPEG_BYTES),
                    write("Page-With-Image.md", IMAGE_PAGE_CONTENT),
                ],
            },
        ),
        (
            "0dca5bd9b5d7ef937710e056f575e86c0184ba85",
            CommitDraft {
                author: n6543.clone(),
                committer: n6543,
                message: "add unescaped file\n".into(),
                changes: vec![write("Unescaped File.md", UNESCAPED_CONTENT)],
            },
        ),
    ])
}

/// Populate an empty store with fixture users, repositories and wikis.
pub async fn seed(store: &Store) -> AppResult<()> {
    let password_hash = fixture_password_hash()?;

    for (login, full_name, is_admin) in [
        ("user1", "User One", true),
        ("user2", "", false),
        ("user4", "", false),
    ] {
        UserRepo::create(
            store,
            &CreateUser {
                login: login.into(),
                full_name: full_name.into(),
                email: format!("{login}@example.com"),
                password_hash: password_hash.clone(),
                is_admin,
            },
        )
        .await?;
    }

    for (name, is_private) in [("repo1", false), ("repo2", true), ("repo3", false)] {
        RepositoryRepo::create(
            store,
            &CreateRepository {
                owner: "user2".into(),
                name: name.into(),
                is_private,
            },
        )
        .await?;
    }

    for (id, draft) in repo1_history()? {
        WikiRepo::import_commit(store, "user2", "repo1", id, draft).await?;
    }

    WikiRepo::create_page(
        store,
        "user2",
        "repo2",
        &CreateWikiPage {
            title: "Home".into(),
            content: PRIVATE_HOME_CONTENT.to_vec(),
            message: "Add Home.md\n".into(),
            signature: signature("user2", "user2@example.com", at(2020, 3, 1, 12, 0, 0)?),
        },
    )
    .await?;

    tracing::info!("Fixtures seeded");
    Ok(())
}

/// Drop all data and seed the fixtures again.
pub async fn reset(store: &Store) -> AppResult<()> {
    store.clear().await;
    seed(store).await
}
