use storecheck_core::VerifyError;
use thiserror::Error;

use crate::surface::Region;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out after {waited_ms}ms waiting for {condition}")]
    Timeout { condition: String, waited_ms: u64 },

    /// The page moved to a different state than the scenario expected, e.g.
    /// the cart accepted an item that should have been refused.
    #[error("expected {expected}, but {observed}")]
    UnexpectedTransition { expected: String, observed: String },

    #[error("{region} is not rendered")]
    RegionMissing { region: Region },

    #[error("no product option with value \"{product_id}\"")]
    UnknownProduct { product_id: String },

    #[error("login did not reach the store page; landed on {url}")]
    LoginRejected { url: String },

    #[error("browser driver error: {0}")]
    Driver(String),

    #[error(transparent)]
    Verify(#[from] VerifyError),
}
