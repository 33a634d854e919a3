#![allow(dead_code)]

use async_trait::async_trait;
use forgewiki_api::auth::session::SessionConfig;
use forgewiki_api::config::ServerConfig;
use forgewiki_api::router::build_app_router;
use forgewiki_api::state::AppState;
use forgewiki_conformance::environment::{EnvGuard, EnvironmentError, FixtureEnvironment};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn server_config(fixture_reset_enabled: bool) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        request_timeout_secs: 30,
        app_url: "http://localhost:3000/".to_string(),
        fixture_reset_enabled,
        session: SessionConfig {
            secret: "conformance-test-secret".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Start a freshly seeded service on an ephemeral port.
pub async fn spawn_server(config: ServerConfig) -> Result<(String, JoinHandle<()>), EnvironmentError> {
    let state = AppState::seeded(config)
        .await
        .map_err(|e| EnvironmentError::Startup(e.to_string()))?;
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|e| EnvironmentError::Startup(e.to_string()))?;
    let addr = listener
        .local_addr()
        .map_err(|e| EnvironmentError::Startup(e.to_string()))?;

    let app = build_app_router(state);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("in-process server stopped: {e}");
        }
    });
    Ok((format!("http://{addr}"), handle))
}

/// Spawns a new service per scenario and aborts it when the guard drops.
#[derive(Default)]
pub struct InProcessEnvironment;

#[async_trait]
impl FixtureEnvironment for InProcessEnvironment {
    async fn acquire(&self) -> Result<EnvGuard, EnvironmentError> {
        let (base_url, handle) = spawn_server(server_config(false)).await?;
        Ok(EnvGuard::new(base_url).on_release(move || handle.abort()))
    }
}
