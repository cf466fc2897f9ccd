use anyhow::Context;
use storecheck_core::InsufficientFundsFixture;
use storecheck_page::{StorePage, StoreSurface, Waits};

use super::ScenarioOutcome;

/// Adds more than the buyer can afford and expects the store to refuse.
pub(crate) async fn run_insufficient_funds<S: StoreSurface>(
    surface: S,
    fixture: &InsufficientFundsFixture,
    waits: Waits,
) -> anyhow::Result<ScenarioOutcome> {
    let mut page = StorePage::navigate(surface, waits)
        .await
        .context("store page did not load")?;

    page.attempt_add_product_and_expect_error(fixture.selection(), &fixture.expected_message)
        .await
        .with_context(|| {
            format!(
                "adding {} x product {} should be refused",
                fixture.amount, fixture.product_id
            )
        })?;

    Ok(ScenarioOutcome::Passed)
}
