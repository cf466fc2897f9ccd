//! Scenario fixtures: the literal inputs and expectations the purchase and
//! error-handling scenarios run with.
//!
//! Fixtures are optional. Without a file the built-in defaults describe the
//! reference storefront (Banana at $23 with $4.70 VAT, a TV that cannot be
//! bought fifty at a time).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::products::CartSelection;
use crate::receipt::ExpectedReceipt;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseFixture {
    pub product_id: String,
    pub quantity: String,
    pub expected: ExpectedReceipt,
}

impl PurchaseFixture {
    #[must_use]
    pub fn selection(&self) -> CartSelection {
        CartSelection::new(&self.product_id, &self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientFundsFixture {
    pub product_id: String,
    pub amount: String,
    pub expected_message: String,
}

impl InsufficientFundsFixture {
    #[must_use]
    pub fn selection(&self) -> CartSelection {
        CartSelection::new(&self.product_id, &self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFixtures {
    #[serde(default = "default_purchase")]
    pub purchase: PurchaseFixture,
    #[serde(default = "default_insufficient_funds")]
    pub insufficient_funds: InsufficientFundsFixture,
}

impl Default for ScenarioFixtures {
    fn default() -> Self {
        Self {
            purchase: default_purchase(),
            insufficient_funds: default_insufficient_funds(),
        }
    }
}

fn default_purchase() -> PurchaseFixture {
    PurchaseFixture {
        product_id: "2".to_owned(),
        quantity: "1".to_owned(),
        expected: ExpectedReceipt {
            items: "1 x Banana - $23".to_owned(),
            total: "23".to_owned(),
            vat: "4.7".to_owned(),
            grand_total: "27.7".to_owned(),
            buyer_name: "Malin".to_owned(),
            shipping_address: "Testgatan 1".to_owned(),
        },
    }
}

fn default_insufficient_funds() -> InsufficientFundsFixture {
    InsufficientFundsFixture {
        product_id: "10".to_owned(),
        amount: "50".to_owned(),
        expected_message: "Insufficient funds!".to_owned(),
    }
}

/// Load and validate scenario fixtures from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_fixtures(path: &Path) -> Result<ScenarioFixtures, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FixturesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_fixtures(&content)
}

/// Parse and validate fixtures from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not valid YAML or fails validation.
pub fn parse_fixtures(content: &str) -> Result<ScenarioFixtures, ConfigError> {
    let fixtures: ScenarioFixtures = serde_yaml::from_str(content)?;
    validate_fixtures(&fixtures)?;
    Ok(fixtures)
}

fn validate_fixtures(fixtures: &ScenarioFixtures) -> Result<(), ConfigError> {
    let required = [
        ("purchase.product_id", &fixtures.purchase.product_id),
        ("purchase.quantity", &fixtures.purchase.quantity),
        ("purchase.expected.buyer_name", &fixtures.purchase.expected.buyer_name),
        (
            "purchase.expected.shipping_address",
            &fixtures.purchase.expected.shipping_address,
        ),
        ("insufficient_funds.product_id", &fixtures.insufficient_funds.product_id),
        ("insufficient_funds.amount", &fixtures.insufficient_funds.amount),
        (
            "insufficient_funds.expected_message",
            &fixtures.insufficient_funds.expected_message,
        ),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{field} must be non-empty")));
        }
    }

    for (field, value) in [
        ("purchase.quantity", &fixtures.purchase.quantity),
        ("insufficient_funds.amount", &fixtures.insufficient_funds.amount),
    ] {
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "{field} must be a whole number, got \"{value}\""
            )));
        }
    }

    Ok(())
}
