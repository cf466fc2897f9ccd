use anyhow::Context;
use storecheck_core::PurchaseFixture;
use storecheck_page::{StorePage, StoreSurface, Waits};

use super::ScenarioOutcome;

/// Buys the fixture's product and checks every receipt field.
pub(crate) async fn run_purchase<S: StoreSurface>(
    surface: S,
    fixture: &PurchaseFixture,
    waits: Waits,
) -> anyhow::Result<ScenarioOutcome> {
    let expected = &fixture.expected;

    let receipt = StorePage::navigate(surface, waits)
        .await
        .context("store page did not load")?
        .add_product_to_cart(fixture.selection())
        .await
        .context("adding product to cart")?
        .proceed_to_buy()
        .await
        .context("proceeding to checkout")?
        .confirm_purchase(&expected.buyer_name, &expected.shipping_address)
        .await
        .context("confirming purchase")?;

    receipt
        .verify_receipt(expected)
        .await
        .context("receipt does not match")?;

    tracing::info!(
        product_id = %fixture.product_id,
        grand_total = %expected.grand_total,
        "purchase receipt verified"
    );
    Ok(ScenarioOutcome::Passed)
}
