use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A listed product has no price detail. The whole reconciliation is void.
    #[error("price details missing for product ID: {product_id}")]
    MissingPriceDetail { product_id: String },

    #[error("price detail for product ID {product_id} reports id {detail_id}")]
    DetailIdMismatch { product_id: String, detail_id: u64 },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
