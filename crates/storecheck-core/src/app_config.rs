use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Login credentials handed to the login scenario. The password never
/// appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("role", &self.role)
            .finish()
    }
}

/// Fully resolved harness configuration. Nothing downstream of this struct
/// reads the process environment.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub base_url: String,
    pub store_path: String,
    pub login_path: String,
    pub api_path: String,
    pub webdriver_url: String,
    pub credentials: Option<Credentials>,
    pub request_timeout_secs: u64,
    pub ui_timeout_ms: u64,
    pub ui_poll_interval_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl AppConfig {
    /// Absolute URL of the store view, e.g. `http://localhost:3000/store2`.
    #[must_use]
    pub fn store_url(&self) -> String {
        join_url(&self.base_url, &self.store_path)
    }

    /// Absolute URL of the login view.
    #[must_use]
    pub fn login_url(&self) -> String {
        join_url(&self.base_url, &self.login_path)
    }

    /// Base URL every API endpoint is resolved against, e.g.
    /// `http://localhost:3000/store2/api/v1`.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        join_url(&self.base_url, &self.api_path)
    }

    #[must_use]
    pub fn ui_timeout(&self) -> Duration {
        Duration::from_millis(self.ui_timeout_ms)
    }

    #[must_use]
    pub fn ui_poll_interval(&self) -> Duration {
        Duration::from_millis(self.ui_poll_interval_ms)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("base_url", &self.base_url)
            .field("store_path", &self.store_path)
            .field("login_path", &self.login_path)
            .field("api_path", &self.api_path)
            .field("webdriver_url", &self.webdriver_url)
            .field("credentials", &self.credentials)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("ui_timeout_ms", &self.ui_timeout_ms)
            .field("ui_poll_interval_ms", &self.ui_poll_interval_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
