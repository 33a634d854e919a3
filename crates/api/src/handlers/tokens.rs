//! Handlers for `/users/{username}/tokens`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use forgewiki_core::error::CoreError;
use forgewiki_core::structs::{AccessToken, CreateAccessTokenOption};
use forgewiki_store::models::access_token::CreateAccessToken;
use forgewiki_store::models::user::User;
use forgewiki_store::repositories::{AccessTokenRepo, UserRepo};

use crate::auth::token::generate_api_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionUser;
use crate::state::AppState;

/// Resolve `username`, allowing only the user themself or an admin.
async fn token_owner(state: &AppState, caller: &User, username: &str) -> AppResult<User> {
    if !caller.is_admin && !caller.login.eq_ignore_ascii_case(username) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{} cannot manage tokens of {username}",
            caller.login
        ))));
    }
    UserRepo::find_by_login(&state.pool, username)
        .await
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", username)))
}

/// POST /api/v1/users/{username}/tokens
///
/// Issue a new API token. The plaintext is returned once in `sha1`; only its
/// hash is kept.
pub async fn create_token(
    SessionUser(caller): SessionUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<CreateAccessTokenOption>,
) -> AppResult<(StatusCode, Json<AccessToken>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Token name must not be empty".into()));
    }
    let owner = token_owner(&state, &caller, &username).await?;

    let generated = generate_api_token();
    let record = AccessTokenRepo::create(
        &state.pool,
        &CreateAccessToken {
            user_id: owner.id,
            name: name.to_string(),
            token_hash: generated.hash,
            token_last_eight: generated.last_eight,
        },
    )
    .await?;

    tracing::info!(user = %owner.login, token = %record.name, "API token issued");

    Ok((
        StatusCode::CREATED,
        Json(AccessToken {
            id: record.id,
            name: record.name,
            sha1: generated.plaintext,
            token_last_eight: record.token_last_eight,
        }),
    ))
}

/// GET /api/v1/users/{username}/tokens
///
/// List a user's tokens. `sha1` is always empty here.
pub async fn list_tokens(
    SessionUser(caller): SessionUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<AccessToken>>> {
    let owner = token_owner(&state, &caller, &username).await?;
    let tokens = AccessTokenRepo::list_by_user(&state.pool, owner.id)
        .await
        .into_iter()
        .map(|t| AccessToken {
            id: t.id,
            name: t.name,
            sha1: String::new(),
            token_last_eight: t.token_last_eight,
        })
        .collect();
    Ok(Json(tokens))
}
