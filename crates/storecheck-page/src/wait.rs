//! Bounded polling against a [`StoreSurface`].

use std::time::Duration;

use storecheck_core::{FieldMismatch, VerifyError};
use tokio::time::Instant;

use crate::error::PageError;
use crate::surface::{Region, StoreSurface};

/// How long UI waits may take and how often they poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waits {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Waits {
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    #[must_use]
    pub fn from_config(config: &storecheck_core::AppConfig) -> Self {
        Self::new(config.ui_timeout(), config.ui_poll_interval())
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for Waits {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_millis(100))
    }
}

/// Polls until `region` is visible.
///
/// # Errors
///
/// Returns [`PageError::Timeout`] naming the region if it does not appear
/// within `waits.timeout`; surface errors are propagated as-is.
pub async fn wait_visible<S>(surface: &S, region: Region, waits: Waits) -> Result<(), PageError>
where
    S: StoreSurface + ?Sized,
{
    let deadline = Instant::now() + waits.timeout;
    loop {
        if surface.is_visible(region).await? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(PageError::Timeout {
                condition: format!("{region} to become visible"),
                waited_ms: waits.timeout_ms(),
            });
        }
        tokio::time::sleep(waits.poll_interval).await;
    }
}

/// Waits for `region` and returns its text.
///
/// # Errors
///
/// See [`wait_visible`].
pub async fn visible_text<S>(surface: &S, region: Region, waits: Waits) -> Result<String, PageError>
where
    S: StoreSurface + ?Sized,
{
    wait_visible(surface, region, waits).await?;
    surface.read_text(region).await
}

/// Polls `region` until its text equals `expected` exactly.
///
/// The region must become visible first. After that, mismatching text is
/// re-read until the deadline, matching auto-retrying UI assertions; the last
/// text read is reported on failure.
///
/// # Errors
///
/// - [`PageError::Timeout`] if the region never becomes visible.
/// - [`PageError::Verify`] with a [`VerifyError::FieldMismatch`] if the text
///   still differs at the deadline.
pub async fn expect_text<S>(
    surface: &S,
    region: Region,
    field: &'static str,
    expected: &str,
    waits: Waits,
) -> Result<(), PageError>
where
    S: StoreSurface + ?Sized,
{
    let deadline = Instant::now() + waits.timeout;
    wait_visible(surface, region, waits).await?;
    loop {
        let actual = surface.read_text(region).await?;
        if actual == expected {
            return Ok(());
        }
        if Instant::now() >= deadline {
            tracing::debug!(%region, expected, actual = %actual, "text assertion failed");
            return Err(VerifyError::FieldMismatch(FieldMismatch {
                field,
                expected: expected.to_owned(),
                actual,
            })
            .into());
        }
        tokio::time::sleep(waits.poll_interval).await;
    }
}

/// Text of `region` if it is currently visible, without waiting.
///
/// # Errors
///
/// Propagates surface errors.
pub async fn text_if_visible<S>(surface: &S, region: Region) -> Result<Option<String>, PageError>
where
    S: StoreSurface + ?Sized,
{
    if surface.is_visible(region).await? {
        surface.read_text(region).await.map(Some)
    } else {
        Ok(None)
    }
}
