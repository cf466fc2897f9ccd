//! Store API response types.
//!
//! ### `GET /product/list`
//! `{"products": [{"id": "2", "name": "Banana"}, ...]}`. Ids are strings.
//! An absent or `null` `products` key is treated like an empty array.
//!
//! ### `GET /price/{id}`
//! `{"id": 2, "price": 23, "vat": 4.7, "name": "Banana"}`. Here the id is a
//! number and prices are JSON numbers, not display strings. Some backends
//! answer an unknown id with `200` and a `null` body, so the client
//! deserializes into `Option<RawPriceDetail>`.

use serde::Deserialize;

/// Top-level response from `GET /product/list`.
#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Option<Vec<RawListEntry>>,
}

/// A sellable item as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawListEntry {
    pub id: String,
    pub name: String,
}

/// Price and VAT for one product, from `GET /price/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPriceDetail {
    pub id: u64,
    pub price: f64,
    pub vat: f64,
    pub name: String,
}
