//! The capability contract between the page model and a browser engine.
//!
//! [`StoreSurface`] speaks only in storefront terms: select a product, read
//! the receipt total. Which CSS selector or accessibility role backs each
//! capability is the adapter's business; scenarios and the scraper never see
//! one.

use async_trait::async_trait;
use storecheck_core::Credentials;

use crate::error::PageError;

/// A text region of the store view whose content the harness reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Feedback shown after add-to-cart, e.g. `"Insufficient funds!"`.
    BuyMessage,
    /// Lines currently in the cart.
    CartSummary,
    ReceiptItems,
    ReceiptTotal,
    ReceiptVat,
    ReceiptGrandTotal,
    /// `"Thank you for your purchase, <name>"`.
    ThankYouMessage,
    /// `"It will be shipped to: <address>"`.
    ReceiptAddress,
}

impl Region {
    #[must_use]
    pub fn is_receipt(self) -> bool {
        matches!(
            self,
            Region::ReceiptItems
                | Region::ReceiptTotal
                | Region::ReceiptVat
                | Region::ReceiptGrandTotal
                | Region::ThankYouMessage
                | Region::ReceiptAddress
        )
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Region::BuyMessage => "buy message",
            Region::CartSummary => "cart summary",
            Region::ReceiptItems => "receipt items",
            Region::ReceiptTotal => "receipt total",
            Region::ReceiptVat => "receipt VAT",
            Region::ReceiptGrandTotal => "receipt grand total",
            Region::ThankYouMessage => "thank-you message",
            Region::ReceiptAddress => "receipt address",
        };
        f.write_str(name)
    }
}

/// Raw cell text of one product-table row, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedRow {
    pub name_cell_text: String,
    pub price_cell_text: String,
}

impl ScrapedRow {
    #[must_use]
    pub fn new(name_cell_text: impl Into<String>, price_cell_text: impl Into<String>) -> Self {
        Self {
            name_cell_text: name_cell_text.into(),
            price_cell_text: price_cell_text.into(),
        }
    }
}

/// Storefront capabilities a browser adapter must provide.
///
/// Actions take `&mut self`; observations take `&self` so that anything
/// holding only a shared reference (the table scraper) cannot change the
/// page. Every call returns once the engine reports the action settled;
/// waiting for application-level state is the page model's job.
#[async_trait]
pub trait StoreSurface: Send + Sync {
    /// Loads the store view and waits for it to be ready.
    async fn open_store(&mut self) -> Result<(), PageError>;

    /// Loads the login view.
    async fn open_login(&mut self) -> Result<(), PageError>;

    /// Fills and submits the login form.
    async fn log_in(&mut self, credentials: &Credentials) -> Result<(), PageError>;

    async fn current_url(&self) -> Result<String, PageError>;

    /// Picks the product whose option value is `product_id`.
    async fn select_product(&mut self, product_id: &str) -> Result<(), PageError>;

    /// Replaces the amount input's content with `amount`.
    async fn set_amount(&mut self, amount: &str) -> Result<(), PageError>;

    async fn submit_add_to_cart(&mut self) -> Result<(), PageError>;

    /// Leaves the cart for the checkout form.
    async fn submit_buy(&mut self) -> Result<(), PageError>;

    /// Fills the buyer name and address inputs of the checkout form.
    async fn fill_buyer(&mut self, name: &str, address: &str) -> Result<(), PageError>;

    async fn submit_confirm_purchase(&mut self) -> Result<(), PageError>;

    /// Whether `region` is currently rendered and visible.
    async fn is_visible(&self, region: Region) -> Result<bool, PageError>;

    /// Rendered text of `region`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::RegionMissing`] if the region is not rendered.
    async fn read_text(&self, region: Region) -> Result<String, PageError>;

    /// Cell text of every product-table row, in rendered order.
    async fn product_rows(&self) -> Result<Vec<ScrapedRow>, PageError>;
}
