//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use forgewiki_core::error::CoreError;
use forgewiki_core::structs::{LoginRequest, UserInfo};
use forgewiki_store::repositories::UserRepo;

use crate::auth::password::verify_password;
use crate::auth::session::{expired_session_cookie, issue_session_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Sets the session cookie and
/// returns the user's public info.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_login(&state.pool, &input.username)
        .await
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user = %user.login, "Failed login attempt");
        return Err(invalid_credentials());
    }

    let token = issue_session_token(user.id, &user.login, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Session token error: {e}")))?;

    tracing::info!(user = %user.login, "User logged in");

    Ok((
        [(SET_COOKIE, session_cookie(&token, &state.config.session))],
        Json(UserInfo {
            id: user.id,
            login: user.login,
            full_name: user.full_name,
            email: user.email,
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie. Sessions are stateless, so this never fails.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, expired_session_cookie())],
    )
}
