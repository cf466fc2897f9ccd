//! Canonicalization of raw product data into [`ProductRecord`].
//!
//! Both the table scraper and the API reconciliation engine route their raw
//! strings through [`normalize`], so the UI and API sides always agree on
//! what "the same product" looks like.

use crate::products::ProductRecord;

/// Normalizes a raw name/price pair into a [`ProductRecord`].
///
/// - name: surrounding whitespace trimmed, lower-cased.
/// - price: surrounding whitespace trimmed, every character other than an
///   ASCII digit or `.` removed (`"$1,299.00 incl. tax"` becomes `"1299.00."`).
///
/// Never fails. Malformed input yields an empty or partial price string; the
/// comparison that follows is what surfaces it.
#[must_use]
pub fn normalize(raw_name: &str, raw_price: &str) -> ProductRecord {
    ProductRecord {
        name: raw_name.trim().to_lowercase(),
        price: raw_price
            .trim()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect(),
    }
}

/// Renders a numeric API price in its shortest decimal form.
///
/// Whole numbers drop the fractional part (`23.0` → `"23"`), everything else
/// uses the shortest representation that round-trips (`4.7` → `"4.7"`).
#[must_use]
pub fn canonical_price(price: f64) -> String {
    format!("{price}")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
