use std::sync::Arc;

use forgewiki_store::DbPool;

use crate::config::ServerConfig;
use crate::error::AppResult;
use crate::fixtures;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: both fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Users, tokens, repositories and wiki histories.
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Fresh store seeded with the fixture data.
    pub async fn seeded(config: ServerConfig) -> AppResult<Self> {
        let pool = forgewiki_store::create_pool();
        fixtures::seed(&pool).await?;
        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }
}
