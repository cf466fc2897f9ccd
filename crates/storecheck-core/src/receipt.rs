//! Post-purchase receipt snapshot and its validator.
//!
//! Receipt values are pre-formatted display strings (`"27.7"`, not `27.7`),
//! so totals are compared as exact strings. Buyer name and address are
//! embedded in boilerplate sentences and use substring matching.

use serde::{Deserialize, Serialize};

use crate::verify::{FieldMismatch, VerifyError};

/// Rendered fields of a completed purchase, read once after confirmation.
///
/// Fields are private and only exposed through getters; a snapshot cannot be
/// edited after it has been read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSnapshot {
    items: String,
    total: String,
    vat: String,
    grand_total: String,
    buyer_name: String,
    shipping_address: String,
}

impl ReceiptSnapshot {
    /// Builds a snapshot from the six rendered receipt regions.
    ///
    /// `buyer_name` is the full thank-you text and `shipping_address` the full
    /// shipping sentence, as rendered.
    #[must_use]
    pub fn new(
        items: String,
        total: String,
        vat: String,
        grand_total: String,
        buyer_name: String,
        shipping_address: String,
    ) -> Self {
        Self {
            items,
            total,
            vat,
            grand_total,
            buyer_name,
            shipping_address,
        }
    }

    /// Line items, e.g. `"1 x Banana - $23"`.
    #[must_use]
    pub fn items(&self) -> &str {
        &self.items
    }

    #[must_use]
    pub fn total(&self) -> &str {
        &self.total
    }

    #[must_use]
    pub fn vat(&self) -> &str {
        &self.vat
    }

    #[must_use]
    pub fn grand_total(&self) -> &str {
        &self.grand_total
    }

    /// Thank-you text, e.g. `"Thank you for your purchase, Malin"`.
    #[must_use]
    pub fn buyer_name(&self) -> &str {
        &self.buyer_name
    }

    /// Shipping text, e.g. `"It will be shipped to: Testgatan 1"`.
    #[must_use]
    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }
}

/// Literal expectations for a purchase receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedReceipt {
    pub items: String,
    pub total: String,
    pub vat: String,
    pub grand_total: String,
    pub buyer_name: String,
    pub shipping_address: String,
}

impl ExpectedReceipt {
    /// Phrase the thank-you region must contain.
    #[must_use]
    pub fn thank_you_phrase(&self) -> String {
        thank_you_phrase(&self.buyer_name)
    }

    /// Phrase the address region must contain.
    #[must_use]
    pub fn shipping_phrase(&self) -> String {
        shipping_phrase(&self.shipping_address)
    }

    /// Checks every receipt field and reports all mismatches together.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::ReceiptMismatch`] listing each field that
    /// differs, in receipt order.
    pub fn validate(&self, snapshot: &ReceiptSnapshot) -> Result<(), VerifyError> {
        let mut mismatches = Vec::new();

        let exact = [
            ("items", &self.items, snapshot.items()),
            ("total", &self.total, snapshot.total()),
            ("vat", &self.vat, snapshot.vat()),
            ("grand total", &self.grand_total, snapshot.grand_total()),
        ];
        for (field, expected, actual) in exact {
            if expected != actual {
                mismatches.push(FieldMismatch {
                    field,
                    expected: expected.clone(),
                    actual: actual.to_owned(),
                });
            }
        }

        let contains = [
            ("thank you message", self.thank_you_phrase(), snapshot.buyer_name()),
            ("shipping address", self.shipping_phrase(), snapshot.shipping_address()),
        ];
        for (field, expected, actual) in contains {
            if !actual.contains(&expected) {
                mismatches.push(FieldMismatch {
                    field,
                    expected,
                    actual: actual.to_owned(),
                });
            }
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(VerifyError::ReceiptMismatch { mismatches })
        }
    }
}

#[must_use]
pub fn thank_you_phrase(buyer_name: &str) -> String {
    format!("Thank you for your purchase, {buyer_name}")
}

#[must_use]
pub fn shipping_phrase(address: &str) -> String {
    format!("It will be shipped to: {address}")
}
