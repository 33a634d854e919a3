pub mod admin;
pub mod auth;
pub mod health;
pub mod users;
pub mod wiki;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/logout                                  logout
///
/// /users/{username}/tokens                      list, create (session)
///
/// /repos/{owner}/{repo}/wiki/pages              list pages
/// /repos/{owner}/{repo}/wiki/new                create page (token)
/// /repos/{owner}/{repo}/wiki/page/{page}        get, edit, delete
/// /repos/{owner}/{repo}/wiki/revisions/{page}   page history
///
/// /admin/fixtures/reset                         re-seed fixtures (when enabled)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    let router = Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/repos/{owner}/{repo}/wiki", wiki::router());

    if config.fixture_reset_enabled {
        router.nest("/admin", admin::router())
    } else {
        router
    }
}
