//! Extractors resolving the caller from a session cookie or an API token.

use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use forgewiki_core::error::CoreError;
use forgewiki_store::models::user::User;
use forgewiki_store::repositories::{AccessTokenRepo, UserRepo};
use serde::Deserialize;

use crate::auth::session::{cookie_value, validate_session_token, SESSION_COOKIE};
use crate::auth::token::hash_api_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters that may carry an API token.
#[derive(Debug, Default, Deserialize)]
struct TokenParams {
    token: Option<String>,
    access_token: Option<String>,
}

/// API token from `?token=`, `?access_token=` or `Authorization: token <t>`.
fn api_token(parts: &Parts) -> Option<String> {
    let params = Query::<TokenParams>::try_from_uri(&parts.uri)
        .map(|Query(p)| p)
        .unwrap_or_default();
    if let Some(token) = params.token.or(params.access_token) {
        return Some(token);
    }

    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim().to_string())
    } else {
        None
    }
}

async fn user_from_token(state: &AppState, token: &str) -> AppResult<User> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid API token".into()));
    let record = AccessTokenRepo::find_by_hash(&state.pool, &hash_api_token(token))
        .await
        .ok_or_else(invalid)?;
    UserRepo::find_by_id(&state.pool, record.user_id)
        .await
        .ok_or_else(invalid)
}

async fn user_from_session(state: &AppState, parts: &Parts) -> Option<User> {
    let cookie = cookie_value(&parts.headers, SESSION_COOKIE)?;
    let claims = validate_session_token(cookie, &state.config.session).ok()?;
    UserRepo::find_by_id(&state.pool, claims.sub).await
}

/// Caller authenticated by a session cookie.
///
/// ```ignore
/// async fn my_handler(SessionUser(user): SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user = %user.login, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        user_from_session(state, parts)
            .await
            .map(SessionUser)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing or expired session".into(),
                ))
            })
    }
}

/// Caller authenticated by an API token. Required by every wiki write.
#[derive(Debug, Clone)]
pub struct TokenUser(pub User);

impl FromRequestParts<AppState> for TokenUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = api_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing API token".into()))
        })?;
        user_from_token(state, &token).await.map(TokenUser)
    }
}

/// Caller if identifiable, anonymous otherwise.
///
/// A supplied but unknown API token is still rejected with 401; an invalid
/// session cookie is ignored.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = api_token(parts) {
            return user_from_token(state, &token).await.map(|u| MaybeUser(Some(u)));
        }
        Ok(MaybeUser(user_from_session(state, parts).await))
    }
}
