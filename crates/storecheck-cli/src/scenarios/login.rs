use anyhow::Context;
use storecheck_core::Credentials;
use storecheck_page::{LoginPage, StoreSurface, Waits};

use super::ScenarioOutcome;

/// Logs in with the configured credentials and expects the store view.
pub(crate) async fn run_login<S: StoreSurface>(
    surface: S,
    credentials: Option<&Credentials>,
    waits: Waits,
) -> anyhow::Result<ScenarioOutcome> {
    let Some(credentials) = credentials else {
        tracing::warn!("no login credentials configured; skipping login scenario");
        return Ok(ScenarioOutcome::Inconclusive(
            "STORECHECK_USERNAME and STORECHECK_PASSWORD are not set".to_string(),
        ));
    };

    LoginPage::open(surface, waits)
        .await
        .context("login page did not load")?
        .log_in(credentials)
        .await
        .with_context(|| format!("logging in as {}", credentials.username))?;

    Ok(ScenarioOutcome::Passed)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use storecheck_page::{FakeStorefront, PageError};

    use super::*;

    fn waits() -> Waits {
        Waits::new(Duration::from_millis(100), Duration::from_millis(10))
    }

    fn consumer(password: &str) -> Credentials {
        Credentials {
            username: "malin".to_string(),
            password: password.to_string(),
            role: "consumer".to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_reach_the_store() {
        let surface = FakeStorefront::reference().with_login(consumer("secret"));
        let outcome = run_login(surface, Some(&consumer("secret")), waits())
            .await
            .unwrap();
        assert_eq!(outcome, ScenarioOutcome::Passed);
    }

    #[tokio::test]
    async fn rejected_login_fails() {
        let surface = FakeStorefront::reference().with_login(consumer("secret"));
        let err = run_login(surface, Some(&consumer("wrong")), waits())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PageError>(),
            Some(PageError::LoginRejected { .. })
        ));
    }

    #[tokio::test]
    async fn missing_credentials_are_inconclusive() {
        let outcome = run_login(FakeStorefront::reference(), None, waits())
            .await
            .unwrap();
        assert!(matches!(outcome, ScenarioOutcome::Inconclusive(_)));
    }
}
