pub mod app_config;
pub mod config;
pub mod fixtures;
pub mod normalize;
pub mod products;
pub mod receipt;
pub mod verify;

pub use app_config::{AppConfig, Credentials, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use fixtures::{
    load_fixtures, parse_fixtures, InsufficientFundsFixture, PurchaseFixture, ScenarioFixtures,
};
pub use normalize::{canonical_price, normalize};
pub use products::{CartSelection, ProductRecord};
pub use receipt::{ExpectedReceipt, ReceiptSnapshot};
pub use verify::{compare_records, expect_exact, FieldMismatch, VerifyError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read fixtures file {path}: {source}")]
    FixturesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixtures file: {0}")]
    FixturesFileParse(#[from] serde_yaml::Error),

    #[error("fixture validation failed: {0}")]
    Validation(String),
}
