use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid values.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("STORECHECK_BASE_URL", "http://localhost:3000");
    m
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STORECHECK_BASE_URL"),
        "expected MissingEnvVar(STORECHECK_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_base_url() {
    let mut map = full_env();
    map.insert("STORECHECK_BASE_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_base_url_without_scheme() {
    let mut map = full_env();
    map.insert("STORECHECK_BASE_URL", "localhost:3000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORECHECK_BASE_URL"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.store_url(), "http://localhost:3000/store2");
    assert_eq!(config.login_url(), "http://localhost:3000/");
    assert_eq!(config.api_base_url(), "http://localhost:3000/store2/api/v1");
    assert_eq!(config.webdriver_url, "http://localhost:4444");
    assert!(config.credentials.is_none());
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.ui_timeout_ms, 5000);
    assert_eq!(config.ui_poll_interval_ms, 100);
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.retry_backoff_base_ms, 500);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("STORECHECK_ENV", "test");
    map.insert("STORECHECK_STORE_PATH", "/shop");
    map.insert("STORECHECK_API_PATH", "/api");
    map.insert("STORECHECK_UI_TIMEOUT_MS", "250");
    map.insert("STORECHECK_MAX_RETRIES", "0");
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(config.env, Environment::Test);
    assert_eq!(config.store_url(), "http://localhost:3000/shop");
    assert_eq!(config.api_base_url(), "http://localhost:3000/api");
    assert_eq!(config.ui_timeout_ms, 250);
    assert_eq!(config.max_retries, 0);
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = full_env();
    map.insert("STORECHECK_UI_TIMEOUT_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STORECHECK_UI_TIMEOUT_MS"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_poll_interval() {
    let mut map = full_env();
    map.insert("STORECHECK_UI_POLL_INTERVAL_MS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_reads_credentials_with_default_role() {
    let mut map = full_env();
    map.insert("STORECHECK_USERNAME", "malin");
    map.insert("STORECHECK_PASSWORD", "secret");
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    let creds = config.credentials.expect("credentials should be set");
    assert_eq!(creds.username, "malin");
    assert_eq!(creds.password, "secret");
    assert_eq!(creds.role, "consumer");
}

#[test]
fn build_app_config_requires_password_when_username_set() {
    let mut map = full_env();
    map.insert("STORECHECK_USERNAME", "malin");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STORECHECK_PASSWORD"),
        "got: {result:?}"
    );
}

#[test]
fn app_config_debug_redacts_password() {
    let mut map = full_env();
    map.insert("STORECHECK_USERNAME", "malin");
    map.insert("STORECHECK_PASSWORD", "secret");
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("secret"), "{rendered}");
}

#[test]
fn parse_environment_ignores_case_and_accepts_prod() {
    assert_eq!(parse_environment("PROD"), Environment::Production);
    assert_eq!(parse_environment(" Test "), Environment::Test);
}

#[test]
fn build_app_config_requires_username_when_password_set() {
    let mut map = full_env();
    map.insert("STORECHECK_PASSWORD", "secret");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "STORECHECK_USERNAME"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_tolerates_padded_numbers() {
    let mut map = full_env();
    map.insert("STORECHECK_MAX_RETRIES", " 4 ");
    let config = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(config.max_retries, 4);
}
