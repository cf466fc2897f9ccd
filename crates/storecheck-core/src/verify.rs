//! Assertion-mismatch errors and the ordered record comparison used by the
//! UI/API reconciliation.

use thiserror::Error;

use crate::products::ProductRecord;

/// A single field whose rendered value differs from the expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {:?}, actual {:?}",
            self.field, self.expected, self.actual
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("record count mismatch: expected {expected} products, UI shows {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("record mismatch at row {index}: expected {expected}, actual {actual}")]
    ContentMismatch {
        index: usize,
        expected: ProductRecord,
        actual: ProductRecord,
    },

    #[error("{0}")]
    FieldMismatch(FieldMismatch),

    #[error("receipt mismatch: {}", format_mismatches(.mismatches))]
    ReceiptMismatch { mismatches: Vec<FieldMismatch> },
}

fn format_mismatches(mismatches: &[FieldMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Compares scraped records against expected records, element by element.
///
/// Order matters: `[a, b]` never equals `[b, a]`. A length difference is
/// reported before any content difference so the two failure modes stay
/// distinguishable.
///
/// # Errors
///
/// - [`VerifyError::LengthMismatch`] when the sequences differ in length.
/// - [`VerifyError::ContentMismatch`] for the first differing position.
pub fn compare_records(
    actual: &[ProductRecord],
    expected: &[ProductRecord],
) -> Result<(), VerifyError> {
    if actual.len() != expected.len() {
        return Err(VerifyError::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    if let Some((index, (a, e))) = actual
        .iter()
        .zip(expected)
        .enumerate()
        .find(|(_, (a, e))| a != e)
    {
        return Err(VerifyError::ContentMismatch {
            index,
            expected: e.clone(),
            actual: a.clone(),
        });
    }

    Ok(())
}

/// Exact string comparison for a single rendered field.
///
/// # Errors
///
/// Returns [`VerifyError::FieldMismatch`] if `actual != expected`.
pub fn expect_exact(field: &'static str, expected: &str, actual: &str) -> Result<(), VerifyError> {
    if expected == actual {
        Ok(())
    } else {
        Err(VerifyError::FieldMismatch(FieldMismatch {
            field,
            expected: expected.to_owned(),
            actual: actual.to_owned(),
        }))
    }
}
