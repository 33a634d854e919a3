//! End-to-end scenarios against the fixture wiki.
//!
//! `S1`..`S6` replay the wiki API test suite with literal expected values;
//! the `P*` scenarios check the behavioral properties over the same
//! fixtures, and `E*` the error statuses.

use std::fmt::Debug;

use async_trait::async_trait;
use forgewiki_core::content::decode_content;
use forgewiki_core::error::CoreError;
use forgewiki_core::structs::{CreateWikiPageOptions, WikiCommit};
use pretty_assertions::Comparison;
use reqwest::StatusCode;

use crate::client::{ClientError, WikiClient};
use crate::config::HarnessConfig;
use crate::environment::EnvironmentError;
use crate::expected;

/// Why a scenario failed.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error("content_base64 does not decode: {0}")]
    Content(#[from] CoreError),

    #[error("{what} mismatch:\n{diff}")]
    Mismatch { what: String, diff: String },
}

/// Fail with a left/right diff unless `expected == actual`.
pub fn ensure_eq<T: PartialEq + Debug + ?Sized>(
    what: &str,
    expected: &T,
    actual: &T,
) -> Result<(), ScenarioError> {
    if expected == actual {
        return Ok(());
    }
    Err(ScenarioError::Mismatch {
        what: what.to_string(),
        diff: Comparison::new(expected, actual).to_string(),
    })
}

/// A logged-in client with an API token, plus the harness configuration.
pub struct ScenarioContext {
    pub client: WikiClient,
    pub config: HarnessConfig,
}

/// One independent end-to-end check.
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Short identifier, e.g. `S1`.
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError>;
}

/// Every scenario, in execution order.
pub fn all() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(GetHome),
        Box::new(ListPages),
        Box::new(CreatePage),
        Box::new(CreateSymbolicPage),
        Box::new(EditAndRename),
        Box::new(HomeRevisions),
        Box::new(SeededPagesConsistent),
        Box::new(RepeatedEdit),
        Box::new(WriteWithoutToken),
        Box::new(MissingPage),
    ]
}

async fn create_and_fetch(
    client: &WikiClient,
    title: &str,
    content: &[u8],
) -> Result<(), ScenarioError> {
    let created = client
        .create_page(&CreateWikiPageOptions::new(title, content))
        .await?;
    ensure_eq("created title", title, created.meta.title.as_str())?;

    let fetched = client.get_page(title).await?;
    ensure_eq(
        "round-tripped content",
        content,
        decode_content(&fetched.content_base64)?.as_slice(),
    )
}

/* --------------------------------------------------------------------------
Wiki API scenarios
-------------------------------------------------------------------------- */

pub struct GetHome;

#[async_trait]
impl Scenario for GetHome {
    fn id(&self) -> &'static str {
        "S1"
    }

    fn name(&self) -> &'static str {
        "get Home page"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let page = ctx.client.get_page(expected::HOME_TITLE).await?;

        ensure_eq("title", expected::HOME_TITLE, page.meta.title.as_str())?;
        ensure_eq("sub_url", expected::HOME_TITLE, page.meta.sub_url.as_str())?;
        ensure_eq("last_commit", &expected::home_commit(), &page.meta.last_commit)?;
        ensure_eq(
            "unpadded content_base64",
            &false,
            &page.content_base64.ends_with('='),
        )?;
        ensure_eq(
            "content",
            expected::HOME_CONTENT,
            decode_content(&page.content_base64)?.as_slice(),
        )?;
        ensure_eq("commit_count", &1, &page.commit_count)?;
        ensure_eq("sidebar", "", page.sidebar.as_str())?;
        ensure_eq("footer", "", page.footer.as_str())
    }
}

pub struct ListPages;

#[async_trait]
impl Scenario for ListPages {
    fn id(&self) -> &'static str {
        "S2"
    }

    fn name(&self) -> &'static str {
        "list pages"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let pages = ctx.client.list_pages().await?;
        let seeded = expected::seeded_pages();
        let wanted: Vec<(&str, &str, &WikiCommit)> = seeded
            .iter()
            .map(|p| (p.title, p.sub_url, &p.last_commit))
            .collect();
        let actual: Vec<(&str, &str, &WikiCommit)> = pages
            .iter()
            .map(|p| (p.title.as_str(), p.sub_url.as_str(), &p.last_commit))
            .collect();
        ensure_eq("pages", &wanted, &actual)?;

        for page in &pages {
            ensure_eq(
                "sub_url of title",
                page.title.replace(' ', "-").as_str(),
                page.sub_url.as_str(),
            )?;
        }
        Ok(())
    }
}

pub struct CreatePage;

#[async_trait]
impl Scenario for CreatePage {
    fn id(&self) -> &'static str {
        "S3"
    }

    fn name(&self) -> &'static str {
        "create new page"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        create_and_fetch(&ctx.client, expected::NEW_PAGE_TITLE, expected::NEW_PAGE_CONTENT).await
    }
}

pub struct CreateSymbolicPage;

#[async_trait]
impl Scenario for CreateSymbolicPage {
    fn id(&self) -> &'static str {
        "S4"
    }

    fn name(&self) -> &'static str {
        "create page with symbolic title"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        create_and_fetch(&ctx.client, expected::SYMBOLIC_TITLE, expected::NEW_PAGE_CONTENT).await
    }
}

pub struct EditAndRename;

#[async_trait]
impl Scenario for EditAndRename {
    fn id(&self) -> &'static str {
        "S5"
    }

    fn name(&self) -> &'static str {
        "edit and rename page"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let options = CreateWikiPageOptions::new(expected::RENAME_TARGET, expected::EDITED_CONTENT);
        let edited = ctx.client.edit_page(expected::RENAME_SOURCE, &options).await?;
        ensure_eq("renamed title", expected::RENAME_TARGET, edited.meta.title.as_str())?;

        let fetched = ctx.client.get_page(expected::RENAME_TARGET).await?;
        ensure_eq(
            "edited content",
            expected::EDITED_CONTENT,
            decode_content(&fetched.content_base64)?.as_slice(),
        )?;

        let old = ctx.client.page_status(expected::RENAME_SOURCE).await?;
        ensure_eq("status of old name", &StatusCode::NOT_FOUND, &old)
    }
}

pub struct HomeRevisions;

#[async_trait]
impl Scenario for HomeRevisions {
    fn id(&self) -> &'static str {
        "S6"
    }

    fn name(&self) -> &'static str {
        "revisions of Home"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let revisions = ctx.client.revisions(expected::HOME_TITLE).await?;
        ensure_eq("revisions", &expected::home_revisions(), &revisions)
    }
}

/* --------------------------------------------------------------------------
Properties
-------------------------------------------------------------------------- */

pub struct SeededPagesConsistent;

#[async_trait]
impl Scenario for SeededPagesConsistent {
    fn id(&self) -> &'static str {
        "P1"
    }

    fn name(&self) -> &'static str {
        "seeded pages agree with their revisions"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        for seeded in expected::seeded_pages() {
            let title = seeded.title;
            let page = ctx.client.get_page(title).await?;
            let revisions = ctx.client.revisions(seeded.sub_url).await?;

            let newest = revisions.commits.first();
            ensure_eq(
                &format!("{title} newest revision"),
                &Some(&page.meta.last_commit),
                &newest,
            )?;
            ensure_eq(
                &format!("{title} revision count"),
                &page.commit_count,
                &revisions.count,
            )?;
            ensure_eq(
                &format!("{title} count field"),
                &(revisions.commits.len() as i64),
                &revisions.count,
            )?;
            let content = decode_content(&page.content_base64)?;
            if let Some(committed) = seeded.content {
                ensure_eq(&format!("{title} content"), committed, content.as_slice())?;
            }
        }
        Ok(())
    }
}

pub struct RepeatedEdit;

#[async_trait]
impl Scenario for RepeatedEdit {
    fn id(&self) -> &'static str {
        "P5"
    }

    fn name(&self) -> &'static str {
        "identical edits leave the last payload"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let options = CreateWikiPageOptions::new(expected::HOME_TITLE, expected::EDITED_CONTENT);
        for _ in 0..2 {
            ctx.client.edit_page(expected::HOME_TITLE, &options).await?;
        }

        let page = ctx.client.get_page(expected::HOME_TITLE).await?;
        ensure_eq(
            "content after repeated edit",
            expected::EDITED_CONTENT,
            decode_content(&page.content_base64)?.as_slice(),
        )
    }
}

/* --------------------------------------------------------------------------
Error statuses
-------------------------------------------------------------------------- */

pub struct WriteWithoutToken;

#[async_trait]
impl Scenario for WriteWithoutToken {
    fn id(&self) -> &'static str {
        "E1"
    }

    fn name(&self) -> &'static str {
        "create without token is unauthorized"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let options = CreateWikiPageOptions::new("Anonymous page", b"nope");
        let status = ctx.client.create_page_anonymously(&options).await?;
        ensure_eq("status", &StatusCode::UNAUTHORIZED, &status)
    }
}

pub struct MissingPage;

#[async_trait]
impl Scenario for MissingPage {
    fn id(&self) -> &'static str {
        "E2"
    }

    fn name(&self) -> &'static str {
        "missing page is not found"
    }

    async fn run(&self, ctx: &ScenarioContext) -> Result<(), ScenarioError> {
        let status = ctx.client.page_status("Does-Not-Exist").await?;
        ensure_eq("status", &StatusCode::NOT_FOUND, &status)
    }
}
