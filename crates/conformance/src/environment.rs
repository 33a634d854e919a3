//! Fixture environments that scenarios run against.
//!
//! Each scenario acquires an [`EnvGuard`] first. Dropping the guard releases
//! the environment on every exit path, including early `?` returns and
//! panics.

use async_trait::async_trait;

use crate::client::{ClientError, WikiClient};
use crate::config::HarnessConfig;

/// Hook run when an [`EnvGuard`] is dropped.
pub type ReleaseHook = Box<dyn FnOnce() + Send>;

/// A fixture environment held for the duration of one scenario.
pub struct EnvGuard {
    base_url: String,
    release: Option<ReleaseHook>,
}

impl EnvGuard {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            release: None,
        }
    }

    /// Run `hook` when the guard is dropped.
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.release = Some(Box::new(hook));
        self
    }

    /// Root URL of the service backing this environment.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Errors while preparing a fixture environment.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("fixture reset failed: {0}")]
    Reset(#[from] ClientError),

    #[error("failed to start service: {0}")]
    Startup(String),
}

/// Source of fresh fixture environments.
#[async_trait]
pub trait FixtureEnvironment: Send + Sync {
    async fn acquire(&self) -> Result<EnvGuard, EnvironmentError>;
}

/// A live instance. Fixtures are re-seeded through the admin endpoint when
/// `reset_fixtures` is set; otherwise the instance is used as found.
pub struct RemoteEnvironment {
    config: HarnessConfig,
}

impl RemoteEnvironment {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl FixtureEnvironment for RemoteEnvironment {
    async fn acquire(&self) -> Result<EnvGuard, EnvironmentError> {
        if self.config.reset_fixtures {
            let client = WikiClient::new(&self.config.base_url, &self.config.owner, &self.config.repo)?;
            client.reset_fixtures().await?;
            tracing::debug!(base_url = %self.config.base_url, "Fixtures reset");
        }
        Ok(EnvGuard::new(self.config.base_url.clone()))
    }
}
