//! Handlers for the `/admin` resource.

use axum::extract::State;
use axum::http::StatusCode;

use crate::error::AppResult;
use crate::fixtures;
use crate::state::AppState;

/// POST /api/v1/admin/fixtures/reset
///
/// Drop all users, tokens and wikis and seed the fixtures again. Only
/// routed when `FIXTURE_RESET_ENABLED=true`.
pub async fn reset_fixtures(State(state): State<AppState>) -> AppResult<StatusCode> {
    fixtures::reset(&state.pool).await?;
    tracing::warn!("Fixture data reset");
    Ok(StatusCode::NO_CONTENT)
}
