//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-number pagination parameters (`?page=&limit=`).
///
/// `page` is 1-based. Values are clamped with
/// [`forgewiki_core::wiki::clamp_limit`] and
/// [`forgewiki_core::wiki::page_offset`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
