/// Errors raised while loading harness configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Target instance and fixture identity used by every scenario.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root URL of the service, without the `/api/v1` prefix.
    pub base_url: String,
    /// Fixture user to log in as; owns `owner/repo`.
    pub user: String,
    pub password: String,
    pub owner: String,
    pub repo: String,
    /// Call `POST /api/v1/admin/fixtures/reset` before each scenario.
    pub reset_fixtures: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            user: "user2".into(),
            password: "password".into(),
            owner: "user2".into(),
            repo: "repo1".into(),
            reset_fixtures: false,
        }
    }
}

fn var_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}

impl HarnessConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `FORGEWIKI_BASE_URL`       | `http://localhost:3000` |
    /// | `FORGEWIKI_USER`           | `user2`                 |
    /// | `FORGEWIKI_PASSWORD`       | `password`              |
    /// | `FORGEWIKI_OWNER`          | `user2`                 |
    /// | `FORGEWIKI_REPO`           | `repo1`                 |
    /// | `FORGEWIKI_RESET_FIXTURES` | `false`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let reset_fixtures = match std::env::var("FORGEWIKI_RESET_FIXTURES") {
            Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "FORGEWIKI_RESET_FIXTURES",
                value,
            })?,
            Err(_) => defaults.reset_fixtures,
        };

        Ok(Self {
            base_url: var_or("FORGEWIKI_BASE_URL", defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            user: var_or("FORGEWIKI_USER", defaults.user),
            password: var_or("FORGEWIKI_PASSWORD", defaults.password),
            owner: var_or("FORGEWIKI_OWNER", defaults.owner),
            repo: var_or("FORGEWIKI_REPO", defaults.repo),
            reset_fixtures,
        })
    }

    /// Same configuration pointed at another instance.
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..self.clone()
        }
    }
}
