use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forgewiki_conformance::config::HarnessConfig;
use forgewiki_conformance::environment::RemoteEnvironment;
use forgewiki_conformance::{runner, scenarios};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forgewiki_conformance=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = HarnessConfig::from_env().context("Failed to load harness configuration")?;
    tracing::info!(
        base_url = %config.base_url,
        repo = %format!("{}/{}", config.owner, config.repo),
        reset_fixtures = config.reset_fixtures,
        "Running wiki conformance scenarios"
    );

    let env = RemoteEnvironment::new(config.clone());
    let scenarios = scenarios::all();
    let report = runner::run_all(&env, &config, &scenarios).await;

    for outcome in &report.outcomes {
        let status = if outcome.passed() { "ok" } else { "FAILED" };
        println!("{:<3} {:<45} {status}", outcome.id, outcome.name);
    }
    for failure in report.failures() {
        if let Some(error) = &failure.error {
            eprintln!("\n--- {} {} ---\n{error}", failure.id, failure.name);
        }
    }
    println!(
        "\n{} passed, {} failed",
        report.passed(),
        report.outcomes.len() - report.passed()
    );

    anyhow::ensure!(report.is_success(), "conformance run failed");
    Ok(())
}
