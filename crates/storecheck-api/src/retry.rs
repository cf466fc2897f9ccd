//! Retry with exponential back-off and jitter for store API requests.
//!
//! Only transport-level failures and 5xx responses are retried. A missing
//! price detail or an unparseable body is a data problem and is returned on
//! the first occurrence.

use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection refused or reset.
/// - HTTP 5xx responses.
///
/// **Not retriable:** 4xx statuses, missing or mismatched price details,
/// deserialization failures, invalid base URLs.
pub(crate) fn is_retriable(err: &ApiError) -> bool {
    match err {
        ApiError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ApiError::UnexpectedStatus { status, .. } => *status >= 500,
        ApiError::Deserialize { .. }
        | ApiError::MissingPriceDetail { .. }
        | ApiError::DetailIdMismatch { .. }
        | ApiError::InvalidBaseUrl { .. } => false,
    }
}

const MAX_DELAY_MS: u64 = 10_000;

/// Sleep before retry number `retry` (1-based): `base × 2^(retry-1)`, capped,
/// then scaled by a random factor in `[0.75, 1.25)`.
fn backoff_delay(backoff_base_ms: u64, retry: u32) -> Duration {
    let exponent = retry.saturating_sub(1).min(10);
    let nominal = backoff_base_ms
        .saturating_mul(1u64 << exponent)
        .min(MAX_DELAY_MS);
    let jitter = 0.75 + rand::random::<f64>() * 0.5;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (nominal as f64 * jitter) as u64;
    Duration::from_millis(jittered)
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// With the default `backoff_base_ms = 500` the sleeps are roughly 500 ms,
/// 1 s, 2 s, ... (±25 % jitter), never more than 10 s. Non-retriable errors
/// are returned on the first occurrence.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retriable(&err) && retry < max_retries => err,
            Err(err) => return Err(err),
        };

        retry += 1;
        let delay = backoff_delay(backoff_base_ms, retry);
        tracing::warn!(
            retry,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "store API request failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn server_error() -> ApiError {
        ApiError::UnexpectedStatus {
            status: 503,
            url: "http://store.test/product/list".to_owned(),
        }
    }

    #[test]
    fn server_status_is_retriable() {
        assert!(is_retriable(&server_error()));
    }

    #[test]
    fn client_status_is_not_retriable() {
        assert!(!is_retriable(&ApiError::UnexpectedStatus {
            status: 404,
            url: "http://store.test/price/9".to_owned(),
        }));
    }

    #[test]
    fn missing_price_detail_is_not_retriable() {
        assert!(!is_retriable(&ApiError::MissingPriceDetail {
            product_id: "9".to_owned(),
        }));
    }

    #[tokio::test]
    async fn retries_transient_error_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(server_error())
                } else {
                    Ok::<u32, ApiError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ApiError>(server_error())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(ApiError::UnexpectedStatus { status: 503, .. })));
    }

    #[tokio::test]
    async fn does_not_retry_missing_detail() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ApiError>(ApiError::MissingPriceDetail {
                    product_id: "4".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ApiError::MissingPriceDetail { .. })));
    }

    #[test]
    fn backoff_doubles_within_jitter_and_caps() {
        for _ in 0..50 {
            let first = backoff_delay(500, 1).as_millis();
            let third = backoff_delay(500, 3).as_millis();
            let huge = backoff_delay(500, 30).as_millis();
            assert!((375..=625).contains(&first), "first: {first}");
            assert!((1_500..=2_500).contains(&third), "third: {third}");
            assert!(huge <= 12_500, "capped: {huge}");
        }
    }
}
