use anyhow::Context;
use storecheck_api::{fetch_expected_products, Reconciliation, StoreApiClient};

/// Prints the normalized product list the API reports, in list order.
pub(crate) async fn run_products(api: &StoreApiClient) -> anyhow::Result<()> {
    match fetch_expected_products(api)
        .await
        .context("fetching products from the API")?
    {
        Reconciliation::Expected(records) => {
            for (index, record) in records.iter().enumerate() {
                println!("{index:>3}  {record}");
            }
            println!("{} products", records.len());
        }
        Reconciliation::Inconclusive { reason } => println!("no products: {reason}"),
    }
    Ok(())
}
