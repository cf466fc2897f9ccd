use std::env::VarError;
use std::str::FromStr;

use crate::app_config::{AppConfig, Credentials, Environment};
use crate::ConfigError;

/// Reads harness settings from the process environment, after merging a
/// `.env` file if one is present.
///
/// # Errors
///
/// Returns `ConfigError` when `STORECHECK_BASE_URL` is unset or any value
/// fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`.
///
/// # Errors
///
/// See [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Typed access over an env-var lookup.
struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    fn present(&self, var: &str) -> Option<String> {
        (self.lookup)(var).ok()
    }

    fn required(&self, var: &str) -> Result<String, ConfigError> {
        self.present(var)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_owned()))
    }

    fn text(&self, var: &str, fallback: &str) -> String {
        self.present(var).unwrap_or_else(|| fallback.to_owned())
    }

    fn number<T>(&self, var: &str, fallback: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.present(var) {
            None => Ok(fallback),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| invalid(var, e.to_string())),
        }
    }
}

fn invalid(var: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_owned(),
        reason: reason.into(),
    }
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let env = EnvReader { lookup };

    let base_url = env.required("STORECHECK_BASE_URL")?;
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(invalid(
            "STORECHECK_BASE_URL",
            format!("\"{base_url}\" must start with http:// or https://"),
        ));
    }

    let credentials = read_credentials(&env)?;

    let ui_poll_interval_ms = env.number("STORECHECK_UI_POLL_INTERVAL_MS", 100u64)?;
    if ui_poll_interval_ms == 0 {
        return Err(invalid(
            "STORECHECK_UI_POLL_INTERVAL_MS",
            "must be greater than zero",
        ));
    }

    Ok(AppConfig {
        env: parse_environment(&env.text("STORECHECK_ENV", "development")),
        log_level: env.text("STORECHECK_LOG_LEVEL", "info"),
        base_url,
        store_path: env.text("STORECHECK_STORE_PATH", "/store2"),
        login_path: env.text("STORECHECK_LOGIN_PATH", "/"),
        api_path: env.text("STORECHECK_API_PATH", "/store2/api/v1"),
        webdriver_url: env.text("STORECHECK_WEBDRIVER_URL", "http://localhost:4444"),
        credentials,
        request_timeout_secs: env.number("STORECHECK_REQUEST_TIMEOUT_SECS", 30)?,
        ui_timeout_ms: env.number("STORECHECK_UI_TIMEOUT_MS", 5000)?,
        ui_poll_interval_ms,
        max_retries: env.number("STORECHECK_MAX_RETRIES", 2)?,
        retry_backoff_base_ms: env.number("STORECHECK_RETRY_BACKOFF_BASE_MS", 500)?,
    })
}

/// Username and password come as a pair or not at all.
fn read_credentials<F>(env: &EnvReader<F>) -> Result<Option<Credentials>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match (
        env.present("STORECHECK_USERNAME"),
        env.present("STORECHECK_PASSWORD"),
    ) {
        (None, None) => Ok(None),
        (Some(username), Some(password)) => Ok(Some(Credentials {
            username,
            password,
            role: env.text("STORECHECK_ROLE", "consumer"),
        })),
        (Some(_), None) => Err(ConfigError::MissingEnvVar("STORECHECK_PASSWORD".to_owned())),
        (None, Some(_)) => Err(ConfigError::MissingEnvVar("STORECHECK_USERNAME".to_owned())),
    }
}

/// Unrecognized names fall back to development.
fn parse_environment(name: &str) -> Environment {
    match name.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
