//! Builds the expected product table from the store API.
//!
//! The list endpoint fixes the order; the price endpoint is queried once per
//! listed product, all requests in flight together. The first failed detail
//! request abandons the rest: a reconciliation built from N-1 of N products
//! would compare against the wrong table.

use std::collections::HashMap;

use futures::future::try_join_all;
use storecheck_core::{canonical_price, normalize, ProductRecord};

use crate::client::StoreApiClient;
use crate::error::ApiError;
use crate::types::{RawListEntry, RawPriceDetail};

/// Result of asking the API what the product table should contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Normalized records in API list order.
    Expected(Vec<ProductRecord>),
    /// The API listed no products, so there is nothing to verify.
    Inconclusive { reason: String },
}

/// Fetches the product list and every product's price detail, and returns
/// the normalized records in list order.
///
/// # Errors
///
/// - Any error from [`StoreApiClient::fetch_product_list`].
/// - [`ApiError::MissingPriceDetail`] naming the first product without a
///   price detail.
/// - [`ApiError::DetailIdMismatch`] if a price endpoint answers for a
///   different product than the one requested.
pub async fn fetch_expected_products(
    client: &StoreApiClient,
) -> Result<Reconciliation, ApiError> {
    let entries = client.fetch_product_list().await?;
    if entries.is_empty() {
        tracing::warn!("API returned an empty product list; skipping reconciliation");
        return Ok(Reconciliation::Inconclusive {
            reason: "API returned an empty product list".to_owned(),
        });
    }

    tracing::info!(products = entries.len(), "fetching price details");

    let details = try_join_all(entries.iter().map(|entry| async move {
        let detail = client.fetch_price_detail(&entry.id).await?;
        if !same_id(&entry.id, detail.id) {
            return Err(ApiError::DetailIdMismatch {
                product_id: entry.id.clone(),
                detail_id: detail.id,
            });
        }
        Ok::<_, ApiError>(detail)
    }))
    .await?;

    let records = join_by_id(&entries, details)?;
    tracing::info!(products = records.len(), "expected product table built from API");
    Ok(Reconciliation::Expected(records))
}

/// Joins price details onto list entries by product id, preserving list
/// order. Detail order is irrelevant.
///
/// # Errors
///
/// Returns [`ApiError::MissingPriceDetail`] for the first entry with no
/// matching detail.
pub fn join_by_id(
    entries: &[RawListEntry],
    details: Vec<RawPriceDetail>,
) -> Result<Vec<ProductRecord>, ApiError> {
    let by_id: HashMap<u64, RawPriceDetail> = details.into_iter().map(|d| (d.id, d)).collect();

    entries
        .iter()
        .map(|entry| {
            let detail = parse_id(&entry.id)
                .and_then(|id| by_id.get(&id))
                .ok_or_else(|| ApiError::MissingPriceDetail {
                    product_id: entry.id.clone(),
                })?;
            Ok(normalize(&entry.name, &canonical_price(detail.price)))
        })
        .collect()
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn same_id(list_id: &str, detail_id: u64) -> bool {
    parse_id(list_id) == Some(detail_id)
}
