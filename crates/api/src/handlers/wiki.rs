//! Handlers for the `/repos/{owner}/{repo}/wiki` resource.
//!
//! Reads are anonymous for public repositories. Writes require an API token
//! whose user owns the repository (or is an admin).

use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::SubsecRound;

use forgewiki_core::content::{decode_content, encode_content};
use forgewiki_core::structs::{
    CommitUser, CreateWikiPageOptions, WikiCommit, WikiCommitList, WikiPage, WikiPageMetaData,
};
use forgewiki_core::types::format_commit_date;
use forgewiki_core::wiki::{
    clamp_limit, default_create_message, html_url, message_or, page_offset, sub_url,
    validate_title,
};
use forgewiki_store::history::{CommitRecord, Signature};
use forgewiki_store::models::repository::Repository;
use forgewiki_store::models::user::User;
use forgewiki_store::models::wiki::{
    CreateWikiPage, DeleteWikiPage, UpdateWikiPage, WikiPageView,
};
use forgewiki_store::repositories::WikiRepo;

use crate::error::AppResult;
use crate::middleware::access::{readable_repository, writable_repository};
use crate::middleware::auth::{MaybeUser, TokenUser};
use crate::query::PaginationParams;
use crate::state::AppState;

/// Header carrying the unpaged number of listed pages.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/* --------------------------------------------------------------------------
Conversions
-------------------------------------------------------------------------- */

fn commit_user(sig: &Signature) -> CommitUser {
    CommitUser::new(&sig.name, &sig.email, format_commit_date(&sig.when))
}

fn wiki_commit(commit: &CommitRecord) -> WikiCommit {
    WikiCommit {
        id: commit.id.clone(),
        author: commit_user(&commit.author),
        committer: commit_user(&commit.committer),
        message: commit.message.clone(),
    }
}

fn page_meta(
    state: &AppState,
    repo: &Repository,
    title: &str,
    last_commit: &CommitRecord,
) -> WikiPageMetaData {
    let sub_url = sub_url(title);
    WikiPageMetaData {
        title: title.to_string(),
        html_url: html_url(&state.config.app_url, &repo.owner, &repo.name, &sub_url),
        sub_url,
        last_commit: wiki_commit(last_commit),
    }
}

fn wiki_page(state: &AppState, repo: &Repository, view: &WikiPageView) -> WikiPage {
    WikiPage {
        meta: page_meta(state, repo, &view.title, &view.last_commit),
        content_base64: encode_content(&view.content),
        commit_count: view.commit_count as i64,
        sidebar: view.sidebar.as_deref().map(encode_content).unwrap_or_default(),
        footer: view.footer.as_deref().map(encode_content).unwrap_or_default(),
    }
}

/// Signature for a commit made by `user` now, at second precision.
fn user_signature(user: &User) -> Signature {
    Signature {
        name: user.display_name().to_string(),
        email: user.email.clone(),
        when: chrono::Utc::now().trunc_subsecs(0),
    }
}

/* --------------------------------------------------------------------------
Reads
-------------------------------------------------------------------------- */

/// GET /repos/{owner}/{repo}/wiki/page/{page_name}
pub async fn get_page(
    MaybeUser(viewer): MaybeUser,
    State(state): State<AppState>,
    Path((owner, repo, page_name)): Path<(String, String, String)>,
) -> AppResult<Json<WikiPage>> {
    let repo = readable_repository(&state.pool, viewer.as_ref(), &owner, &repo).await?;
    let view = WikiRepo::find_page(&state.pool, &repo.owner, &repo.name, &page_name).await?;
    Ok(Json(wiki_page(&state, &repo, &view)))
}

/// GET /repos/{owner}/{repo}/wiki/pages?page=&limit=
///
/// Pages sorted by title, case-insensitively. `X-Total-Count` carries the
/// unpaged total.
pub async fn list_pages(
    MaybeUser(viewer): MaybeUser,
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let repo = readable_repository(&state.pool, viewer.as_ref(), &owner, &repo).await?;
    let pages = WikiRepo::list_pages(&state.pool, &repo.owner, &repo.name).await?;

    let total = pages.len();
    let limit = clamp_limit(params.limit);
    let offset = page_offset(params.page, limit);
    let meta: Vec<WikiPageMetaData> = pages
        .iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(0))
        .map(|p| page_meta(&state, &repo, &p.title, &p.last_commit))
        .collect();

    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(meta)))
}

/// GET /repos/{owner}/{repo}/wiki/revisions/{page_name}
pub async fn list_revisions(
    MaybeUser(viewer): MaybeUser,
    State(state): State<AppState>,
    Path((owner, repo, page_name)): Path<(String, String, String)>,
) -> AppResult<Json<WikiCommitList>> {
    let repo = readable_repository(&state.pool, viewer.as_ref(), &owner, &repo).await?;
    let commits: Vec<WikiCommit> = WikiRepo::revisions(&state.pool, &repo.owner, &repo.name, &page_name)
        .await?
        .iter()
        .map(wiki_commit)
        .collect();
    Ok(Json(WikiCommitList {
        count: commits.len() as i64,
        commits,
    }))
}

/* --------------------------------------------------------------------------
Writes
-------------------------------------------------------------------------- */

/// POST /repos/{owner}/{repo}/wiki/new
///
/// Create a page. Titles are stored verbatim; a blank message defaults to
/// `Add "<title>"`.
pub async fn create_page(
    TokenUser(user): TokenUser,
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    Json(input): Json<CreateWikiPageOptions>,
) -> AppResult<impl IntoResponse> {
    let repo = writable_repository(&state.pool, &user, &owner, &repo).await?;
    validate_title(&input.title)?;
    let content = decode_content(&input.content_base64)?;

    let view = WikiRepo::create_page(
        &state.pool,
        &repo.owner,
        &repo.name,
        &CreateWikiPage {
            title: input.title.clone(),
            content,
            message: message_or(&input.message, || default_create_message(&input.title)),
            signature: user_signature(&user),
        },
    )
    .await?;

    tracing::info!(
        user = %user.login,
        repo = %format!("{}/{}", repo.owner, repo.name),
        title = %view.title,
        commit = %view.last_commit.id,
        "Wiki page created"
    );

    Ok((StatusCode::CREATED, Json(wiki_page(&state, &repo, &view))))
}

/// PATCH /repos/{owner}/{repo}/wiki/page/{page_name}
///
/// Replace a page's content. A non-blank title different from the current
/// one renames the page; a blank message defaults to `Update "<title>"`.
pub async fn edit_page(
    TokenUser(user): TokenUser,
    State(state): State<AppState>,
    Path((owner, repo, page_name)): Path<(String, String, String)>,
    Json(input): Json<CreateWikiPageOptions>,
) -> AppResult<Json<WikiPage>> {
    let repo = writable_repository(&state.pool, &user, &owner, &repo).await?;

    let title = if input.title.trim().is_empty() {
        None
    } else {
        validate_title(&input.title)?;
        Some(input.title)
    };
    let content = decode_content(&input.content_base64)?;

    let updated = WikiRepo::update_page(
        &state.pool,
        &repo.owner,
        &repo.name,
        &page_name,
        &UpdateWikiPage {
            title,
            content,
            message: input.message,
            signature: user_signature(&user),
        },
    )
    .await?;

    tracing::info!(
        user = %user.login,
        repo = %format!("{}/{}", repo.owner, repo.name),
        from = %updated.previous_title,
        to = %updated.page.title,
        commit = %updated.page.last_commit.id,
        "Wiki page updated"
    );

    Ok(Json(wiki_page(&state, &repo, &updated.page)))
}

/// DELETE /repos/{owner}/{repo}/wiki/page/{page_name}
pub async fn delete_page(
    TokenUser(user): TokenUser,
    State(state): State<AppState>,
    Path((owner, repo, page_name)): Path<(String, String, String)>,
) -> AppResult<StatusCode> {
    let repo = writable_repository(&state.pool, &user, &owner, &repo).await?;

    let deleted = WikiRepo::delete_page(
        &state.pool,
        &repo.owner,
        &repo.name,
        &page_name,
        &DeleteWikiPage {
            message: String::new(),
            signature: user_signature(&user),
        },
    )
    .await?;

    tracing::info!(
        user = %user.login,
        repo = %format!("{}/{}", repo.owner, repo.name),
        title = %deleted.title,
        commit = %deleted.commit.id,
        "Wiki page deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
