use serde::{Deserialize, Serialize};

/// A product as it appears on either side of a UI/API reconciliation,
/// normalized so the two sources can be compared with plain equality.
///
/// Equality is string equality on both fields. There is no numeric tolerance:
/// `"23"` and `"23.0"` are different records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Trimmed, lower-cased display name, e.g. `"banana"`.
    pub name: String,
    /// Digits and `.` only, e.g. `"23"` or `"23.5"`.
    pub price: String,
}

impl std::fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{name: {:?}, price: {:?}}}", self.name, self.price)
    }
}

/// Input to the add-to-cart interaction. Consumed on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSelection {
    /// Value of the product option in the selection control, e.g. `"2"`.
    pub product_id: String,
    /// Quantity exactly as typed into the amount input, e.g. `"1"`.
    pub amount: String,
}

impl CartSelection {
    #[must_use]
    pub fn new(product_id: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            amount: amount.into(),
        }
    }
}
