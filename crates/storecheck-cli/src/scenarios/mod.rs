//! Verification scenarios and their outcome reporting.
//!
//! Each scenario owns the surface it is handed and starts from a fresh
//! navigation; nothing is shared between scenarios except read-only
//! configuration.

mod insufficient_funds;
mod login;
mod purchase;
mod reconcile;

use storecheck_api::StoreApiClient;
use storecheck_core::{Credentials, ScenarioFixtures};
use storecheck_page::{StoreSurface, Waits};

pub(crate) use insufficient_funds::run_insufficient_funds;
pub(crate) use login::run_login;
pub(crate) use purchase::run_purchase;
pub(crate) use reconcile::run_reconcile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scenario {
    Reconcile,
    InsufficientFunds,
    Purchase,
    Login,
}

impl Scenario {
    pub(crate) const ALL: [Scenario; 4] = [
        Scenario::Reconcile,
        Scenario::InsufficientFunds,
        Scenario::Purchase,
        Scenario::Login,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Scenario::Reconcile => "reconcile",
            Scenario::InsufficientFunds => "insufficient-funds",
            Scenario::Purchase => "purchase",
            Scenario::Login => "login",
        }
    }
}

/// A scenario that did not fail. Failures travel as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScenarioOutcome {
    Passed,
    /// Nothing could be verified; the reason is reported, not hidden.
    Inconclusive(String),
}

/// Read-only inputs shared by every scenario in a run.
pub(crate) struct ScenarioContext {
    pub(crate) api: StoreApiClient,
    pub(crate) waits: Waits,
    pub(crate) fixtures: ScenarioFixtures,
    pub(crate) credentials: Option<Credentials>,
}

/// Dispatches `scenario` against `surface`.
///
/// # Errors
///
/// Returns the scenario's failure with its diagnostic chain.
#[cfg_attr(not(feature = "webdriver"), allow(dead_code))]
pub(crate) async fn run_scenario<S: StoreSurface>(
    scenario: Scenario,
    ctx: &ScenarioContext,
    surface: S,
) -> anyhow::Result<ScenarioOutcome> {
    match scenario {
        Scenario::Reconcile => run_reconcile(surface, &ctx.api, ctx.waits).await,
        Scenario::InsufficientFunds => {
            run_insufficient_funds(surface, &ctx.fixtures.insufficient_funds, ctx.waits).await
        }
        Scenario::Purchase => run_purchase(surface, &ctx.fixtures.purchase, ctx.waits).await,
        Scenario::Login => run_login(surface, ctx.credentials.as_ref(), ctx.waits).await,
    }
}

/// Prints one line per scenario and decides the run's exit status.
///
/// # Errors
///
/// Fails if any scenario failed, or if `strict` and any was inconclusive.
pub(crate) fn report(
    results: &[(Scenario, anyhow::Result<ScenarioOutcome>)],
    strict: bool,
) -> anyhow::Result<()> {
    let mut failed = 0usize;
    let mut inconclusive = 0usize;

    for (scenario, result) in results {
        match result {
            Ok(ScenarioOutcome::Passed) => println!("PASS          {}", scenario.name()),
            Ok(ScenarioOutcome::Inconclusive(reason)) => {
                inconclusive += 1;
                println!("INCONCLUSIVE  {}: {reason}", scenario.name());
            }
            Err(e) => {
                failed += 1;
                println!("FAIL          {}: {e:#}", scenario.name());
            }
        }
    }

    let passed = results.len() - failed - inconclusive;
    println!("{passed} passed, {inconclusive} inconclusive, {failed} failed");

    if failed > 0 {
        anyhow::bail!("{failed} scenario(s) failed");
    }
    if strict && inconclusive > 0 {
        anyhow::bail!("{inconclusive} scenario(s) inconclusive in strict mode");
    }
    Ok(())
}
