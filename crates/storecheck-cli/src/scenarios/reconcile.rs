use anyhow::Context;
use storecheck_api::{fetch_expected_products, Reconciliation, StoreApiClient};
use storecheck_core::compare_records;
use storecheck_page::{StorePage, StoreSurface, Waits};

use super::ScenarioOutcome;

/// Verifies that the rendered product table equals the API's product list,
/// row for row.
pub(crate) async fn run_reconcile<S: StoreSurface>(
    surface: S,
    api: &StoreApiClient,
    waits: Waits,
) -> anyhow::Result<ScenarioOutcome> {
    let page = StorePage::navigate(surface, waits)
        .await
        .context("store page did not load")?;

    let expected = match fetch_expected_products(api)
        .await
        .context("fetching expected products from the API")?
    {
        Reconciliation::Expected(records) => records,
        Reconciliation::Inconclusive { reason } => {
            return Ok(ScenarioOutcome::Inconclusive(reason));
        }
    };

    let actual = page
        .product_table_data()
        .await
        .context("scraping the product table")?;
    compare_records(&actual, &expected).context("product table does not match the API")?;

    tracing::info!(products = actual.len(), "product table matches the API");
    Ok(ScenarioOutcome::Passed)
}
