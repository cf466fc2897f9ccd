//! Product table scraping.

use storecheck_core::{normalize, ProductRecord};

use crate::error::PageError;
use crate::surface::{ScrapedRow, StoreSurface};

/// Reads the rendered product table into normalized records.
///
/// Row order is preserved; it is compared index by index against the API.
/// An empty table yields an empty vector. Only a shared borrow of the
/// surface is taken, so scraping cannot change the page.
///
/// # Errors
///
/// Propagates surface errors from reading the rows.
pub async fn scrape_product_table<S>(surface: &S) -> Result<Vec<ProductRecord>, PageError>
where
    S: StoreSurface + ?Sized,
{
    let rows = surface.product_rows().await?;
    tracing::debug!(rows = rows.len(), "scraped product table");
    Ok(normalize_rows(&rows))
}

#[must_use]
pub fn normalize_rows(rows: &[ScrapedRow]) -> Vec<ProductRecord> {
    rows.iter()
        .map(|row| normalize(&row.name_cell_text, &row.price_cell_text))
        .collect()
}
