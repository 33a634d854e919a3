use axum::routing::get;
use axum::Router;

use crate::handlers::tokens;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /{username}/tokens   list_tokens (session)
/// POST /{username}/tokens   create_token (session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{username}/tokens",
        get(tokens::list_tokens).post(tokens::create_token),
    )
}
