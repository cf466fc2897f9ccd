pub mod client;
pub mod error;
pub mod reconcile;
mod retry;
pub mod types;

pub use client::StoreApiClient;
pub use error::ApiError;
pub use reconcile::{fetch_expected_products, join_by_id, Reconciliation};
pub use types::{ProductListResponse, RawListEntry, RawPriceDetail};
