//! Login flow in front of the store.

use std::sync::LazyLock;

use regex::Regex;
use storecheck_core::Credentials;
use tokio::time::Instant;

use crate::error::PageError;
use crate::store::{Listing, StorePage};
use crate::surface::StoreSurface;
use crate::wait::Waits;

/// Skips an optional `scheme://authority` so only the path is tested.
static STORE_LANDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*://[^/?#]*)?/store").expect("valid regex")
});

/// Whether the path of `url` starts with `/store`, the view a successful
/// login lands on. The host is never consulted.
#[must_use]
pub fn is_store_landing(url: &str) -> bool {
    STORE_LANDING.is_match(url)
}

/// The login form, before credentials are submitted.
#[derive(Debug)]
pub struct LoginPage<S> {
    surface: S,
    waits: Waits,
}

impl<S: StoreSurface> LoginPage<S> {
    /// Loads the login view.
    ///
    /// # Errors
    ///
    /// Propagates the surface's navigation error.
    pub async fn open(mut surface: S, waits: Waits) -> Result<Self, PageError> {
        surface.open_login().await?;
        tracing::debug!("login page loaded");
        Ok(Self { surface, waits })
    }

    /// Submits `credentials` and waits for the browser to land on the store.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::LoginRejected`] with the last observed URL if the
    /// store is not reached within the UI wait.
    pub async fn log_in(
        mut self,
        credentials: &Credentials,
    ) -> Result<StorePage<S, Listing>, PageError> {
        tracing::info!(username = %credentials.username, role = %credentials.role, "logging in");
        self.surface.log_in(credentials).await?;

        let deadline = Instant::now() + self.waits.timeout;
        loop {
            let url = self.surface.current_url().await?;
            if is_store_landing(&url) {
                tracing::info!(%url, "login reached the store");
                return Ok(StorePage::attach(self.surface, self.waits));
            }
            if Instant::now() >= deadline {
                tracing::warn!(%url, "login did not reach the store");
                return Err(PageError::LoginRejected { url });
            }
            tokio::time::sleep(self.waits.poll_interval).await;
        }
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
