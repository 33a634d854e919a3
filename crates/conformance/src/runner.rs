//! Sequential scenario runner.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::client::WikiClient;
use crate::config::HarnessConfig;
use crate::environment::FixtureEnvironment;
use crate::scenarios::{Scenario, ScenarioContext, ScenarioError};

/// Result of a single scenario.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub id: &'static str,
    pub name: &'static str,
    pub error: Option<ScenarioError>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a run, in execution order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }
}

fn token_name(scenario_id: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("conformance-{}-{nanos}", scenario_id.to_lowercase())
}

/// Run one scenario in a freshly acquired environment.
///
/// The environment guard lives until this function returns, whatever the
/// outcome.
pub async fn run_scenario(
    env: &dyn FixtureEnvironment,
    config: &HarnessConfig,
    scenario: &dyn Scenario,
) -> Result<(), ScenarioError> {
    let guard = env.acquire().await?;

    let mut client = WikiClient::new(guard.base_url(), &config.owner, &config.repo)?;
    client.login(&config.user, &config.password).await?;
    client
        .issue_token(&config.user, &token_name(scenario.id()))
        .await?;

    let ctx = ScenarioContext {
        client,
        config: config.with_base_url(guard.base_url()),
    };
    scenario.run(&ctx).await
}

/// Run every scenario sequentially, each in its own environment.
pub async fn run_all(
    env: &dyn FixtureEnvironment,
    config: &HarnessConfig,
    scenarios: &[Box<dyn Scenario>],
) -> RunReport {
    let mut report = RunReport::default();
    for scenario in scenarios {
        let result = run_scenario(env, config, scenario.as_ref()).await;
        match &result {
            Ok(()) => tracing::info!(id = scenario.id(), name = scenario.name(), "Scenario passed"),
            Err(e) => tracing::error!(
                id = scenario.id(),
                name = scenario.name(),
                error = %e,
                "Scenario failed"
            ),
        }
        report.outcomes.push(ScenarioOutcome {
            id: scenario.id(),
            name: scenario.name(),
            error: result.err(),
        });
    }
    report
}
