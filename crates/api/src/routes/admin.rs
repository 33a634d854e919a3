use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /fixtures/reset   reset_fixtures
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/fixtures/reset", post(admin::reset_fixtures))
}
