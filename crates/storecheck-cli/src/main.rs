mod products;
mod scenarios;


use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scenarios::{Scenario, ScenarioContext, ScenarioOutcome};

#[derive(Debug, Parser)]
#[command(name = "storecheck")]
#[command(about = "End-to-end verification of the storefront UI against its API")]
struct Cli {
    /// Scenario fixtures (YAML); built-in defaults are used when omitted
    #[arg(long, env = "STORECHECK_FIXTURES", global = true)]
    fixtures: Option<PathBuf>,

    /// Treat inconclusive scenarios as failures
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare the rendered product table with the API product list
    Reconcile,
    /// Add an unaffordable quantity and expect the refusal message
    InsufficientFunds,
    /// Buy a product and validate the receipt
    Purchase,
    /// Log in and expect to land on the store
    Login,
    /// Print the normalized product list the API reports
    Products,
    /// Run every scenario
    All,
}

impl Commands {
    fn scenarios(&self) -> &'static [Scenario] {
        match self {
            Commands::Reconcile => &[Scenario::Reconcile],
            Commands::InsufficientFunds => &[Scenario::InsufficientFunds],
            Commands::Purchase => &[Scenario::Purchase],
            Commands::Login => &[Scenario::Login],
            Commands::Products => &[],
            Commands::All => &Scenario::ALL,
        }
    }
}

fn init_tracing(config: &storecheck_core::AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = storecheck_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::debug!(?config, "configuration loaded");

    let api = storecheck_api::StoreApiClient::from_config(&config)?;

    if matches!(cli.command, Commands::Products) {
        return products::run_products(&api).await;
    }

    let fixtures = match &cli.fixtures {
        Some(path) => storecheck_core::load_fixtures(path)?,
        None => storecheck_core::ScenarioFixtures::default(),
    };
    let ctx = ScenarioContext {
        api,
        waits: storecheck_page::Waits::from_config(&config),
        fixtures,
        credentials: config.credentials.clone(),
    };

    let mut results = Vec::new();
    for &scenario in cli.command.scenarios() {
        tracing::info!(scenario = scenario.name(), "running scenario");
        let result = run_in_browser(scenario, &ctx, &config).await;
        results.push((scenario, result));
    }

    scenarios::report(&results, cli.strict)
}

/// Runs one scenario in its own browser session.
#[cfg(feature = "webdriver")]
async fn run_in_browser(
    scenario: Scenario,
    ctx: &ScenarioContext,
    config: &storecheck_core::AppConfig,
) -> anyhow::Result<ScenarioOutcome> {
    let surface = storecheck_page::WebDriverSurface::from_config(config).await?;
    let session = surface.clone();
    let result = scenarios::run_scenario(scenario, ctx, surface).await;
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "failed to close browser session");
    }
    result
}

#[cfg(not(feature = "webdriver"))]
async fn run_in_browser(
    scenario: Scenario,
    _ctx: &ScenarioContext,
    _config: &storecheck_core::AppConfig,
) -> anyhow::Result<ScenarioOutcome> {
    anyhow::bail!(
        "cannot run {}: storecheck was built without the `webdriver` feature",
        scenario.name()
    )
}
