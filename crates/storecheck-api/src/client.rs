//! HTTP client for the store's JSON API.
//!
//! Wraps `reqwest` with store-specific status handling and typed response
//! deserialization. Every request goes through [`retry_with_backoff`], so
//! a flaky network does not fail a reconciliation outright while a genuine
//! data problem (404 on a price detail) still does.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::retry::retry_with_backoff;
use crate::types::{ProductListResponse, RawListEntry, RawPriceDetail};

/// Client for the store API rooted at a base URL such as
/// `http://localhost:3000/store2/api/v1`.
pub struct StoreApiClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl StoreApiClient {
    /// Creates a client with the given request timeout and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for transient errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` does not parse, or
    /// [`ApiError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("storecheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // A trailing slash makes `Url::join` append to the prefix instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Creates a client from resolved harness configuration.
    ///
    /// # Errors
    ///
    /// See [`StoreApiClient::new`].
    pub fn from_config(config: &storecheck_core::AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url(),
            config.request_timeout_secs,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Fetches the canonical product list, in API order.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ApiError::Http`] on network failure after retries.
    /// - [`ApiError::Deserialize`] if the body is not the expected shape.
    pub async fn fetch_product_list(&self) -> Result<Vec<RawListEntry>, ApiError> {
        let url = self.product_list_url()?;
        let body: Option<ProductListResponse> = self.get_json(&url, "product list").await?;
        Ok(body.and_then(|b| b.products).unwrap_or_default())
    }

    /// Fetches price and VAT for a single product.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingPriceDetail`] on 404 or a `null` body.
    /// - [`ApiError::UnexpectedStatus`] for any other non-2xx response.
    /// - [`ApiError::Http`] on network failure after retries.
    /// - [`ApiError::Deserialize`] if the body is not the expected shape.
    pub async fn fetch_price_detail(&self, product_id: &str) -> Result<RawPriceDetail, ApiError> {
        let url = self.price_url(product_id)?;
        let context = format!("price detail for product {product_id}");
        match self.get_json::<RawPriceDetail>(&url, &context).await {
            Ok(Some(detail)) => Ok(detail),
            Ok(None) | Err(ApiError::UnexpectedStatus { status: 404, .. }) => {
                Err(ApiError::MissingPriceDetail {
                    product_id: product_id.to_owned(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// GETs `url` and decodes the body. A literal `null` body decodes to
    /// `None`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<Option<T>, ApiError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            tracing::debug!(%url, "store API request");
            let response = self
                .client
                .get(url.clone())
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?;
            let status = response.status();

            if !status.is_success() {
                return Err(ApiError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.text().await?;
            if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
                return Ok(None);
            }

            serde_json::from_str::<Option<T>>(&body).map_err(|e| ApiError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }

    fn product_list_url(&self) -> Result<Url, ApiError> {
        self.join("product/list")
    }

    fn price_url(&self, product_id: &str) -> Result<Url, ApiError> {
        let segment = utf8_percent_encode(product_id, NON_ALPHANUMERIC);
        self.join(&format!("price/{segment}"))
    }

    fn join(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
