//! Route definitions for repository wikis.
//!
//! Registered under `/repos/{owner}/{repo}/wiki`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::wiki;
use crate::state::AppState;

/// Wiki routes, registered as `/repos/{owner}/{repo}/wiki`.
///
/// ```text
/// GET    /pages                   list_pages
/// POST   /new                     create_page (token)
/// GET    /page/{page_name}        get_page
/// PATCH  /page/{page_name}        edit_page (token)
/// DELETE /page/{page_name}        delete_page (token)
/// GET    /revisions/{page_name}   list_revisions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages", get(wiki::list_pages))
        .route("/new", post(wiki::create_page))
        .route(
            "/page/{page_name}",
            get(wiki::get_page)
                .patch(wiki::edit_page)
                .delete(wiki::delete_page),
        )
        .route("/revisions/{page_name}", get(wiki::list_revisions))
}
