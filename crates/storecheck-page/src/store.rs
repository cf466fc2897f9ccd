//! The store page model.
//!
//! A purchase moves through four states: product listing, cart, checkout
//! form and receipt. [`StorePage`] carries the current state as a type
//! parameter and every transition consumes the page and returns it in the
//! next state, so a receipt accessor on a page that has not confirmed a
//! purchase does not compile.
//!
//! ```text
//! navigate ─► Listing ─add_product_to_cart─► Cart ─proceed_to_buy─► Checkout
//!                                            │  ▲                      │
//!                                            └──┘ add_product_to_cart  confirm_purchase
//!                                                                      ▼
//!                                                                   Receipt
//! ```

use std::marker::PhantomData;

use storecheck_core::{
    CartSelection, ExpectedReceipt, FieldMismatch, ProductRecord, ReceiptSnapshot, VerifyError,
};

use crate::error::PageError;
use crate::scrape::scrape_product_table;
use crate::surface::{Region, StoreSurface};
use crate::wait::{expect_text, text_if_visible, visible_text, wait_visible, Waits};

mod sealed {
    pub trait Sealed {}
}

/// Marker for a [`StorePage`] state.
pub trait PageState: sealed::Sealed {
    const NAME: &'static str;
}

/// States in which products can still be added to the cart.
pub trait Shopping: PageState {}

/// Product table shown, cart empty.
#[derive(Debug)]
pub struct Listing;
/// At least one product added.
#[derive(Debug)]
pub struct Cart;
/// Buyer form shown.
#[derive(Debug)]
pub struct Checkout;
/// Purchase confirmed, receipt shown.
#[derive(Debug)]
pub struct Receipt;

macro_rules! page_state {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl PageState for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

page_state! {
    Listing => "listing",
    Cart => "cart",
    Checkout => "checkout",
    Receipt => "receipt",
}

impl Shopping for Listing {}
impl Shopping for Cart {}

/// The storefront, driven through a [`StoreSurface`], in state `St`.
pub struct StorePage<S, St: PageState> {
    surface: S,
    waits: Waits,
    _state: PhantomData<St>,
}

impl<S, St: PageState> std::fmt::Debug for StorePage<S, St> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorePage")
            .field("state", &St::NAME)
            .field("waits", &self.waits)
            .finish_non_exhaustive()
    }
}

impl<S: StoreSurface, St: PageState> StorePage<S, St> {
    fn transition<Next: PageState>(self) -> StorePage<S, Next> {
        tracing::debug!(from = St::NAME, to = Next::NAME, "store page transition");
        StorePage {
            surface: self.surface,
            waits: self.waits,
            _state: PhantomData,
        }
    }

    #[must_use]
    pub fn state_name(&self) -> &'static str {
        St::NAME
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn waits(&self) -> Waits {
        self.waits
    }

    /// Releases the underlying surface, e.g. to close the browser session.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Scrapes the product listing table into normalized records.
    ///
    /// # Errors
    ///
    /// Propagates surface errors.
    pub async fn product_table_data(&self) -> Result<Vec<ProductRecord>, PageError> {
        scrape_product_table(&self.surface).await
    }
}

impl<S: StoreSurface> StorePage<S, Listing> {
    /// Loads the store view. Every scenario starts here.
    ///
    /// # Errors
    ///
    /// Returns the surface's navigation error; a store that does not load is
    /// fatal to the scenario.
    pub async fn navigate(mut surface: S, waits: Waits) -> Result<Self, PageError> {
        surface.open_store().await?;
        tracing::info!("store page loaded");
        Ok(Self::attach(surface, waits))
    }

    /// Wraps a surface that already shows the store view, e.g. right after
    /// logging in.
    pub(crate) fn attach(surface: S, waits: Waits) -> Self {
        Self {
            surface,
            waits,
            _state: PhantomData,
        }
    }
}

impl<S: StoreSurface, St: Shopping> StorePage<S, St> {
    async fn submit_selection(&mut self, selection: &CartSelection) -> Result<(), PageError> {
        self.surface.select_product(&selection.product_id).await?;
        self.surface.set_amount(&selection.amount).await?;
        self.surface.submit_add_to_cart().await
    }

    /// Selects a product, sets the amount and adds it to the cart.
    ///
    /// # Errors
    ///
    /// Propagates surface errors, e.g. [`PageError::UnknownProduct`].
    pub async fn add_product_to_cart(
        mut self,
        selection: CartSelection,
    ) -> Result<StorePage<S, Cart>, PageError> {
        tracing::info!(
            product_id = %selection.product_id,
            amount = %selection.amount,
            "adding product to cart"
        );
        self.submit_selection(&selection).await?;
        Ok(self.transition())
    }

    /// Submits an add-to-cart that the store must refuse with exactly
    /// `expected_message`. The page stays in its current state.
    ///
    /// # Errors
    ///
    /// - [`PageError::UnexpectedTransition`] if no message appeared but the
    ///   cart changed, i.e. the store accepted the item.
    /// - [`PageError::Timeout`] if no message appeared and nothing else
    ///   changed.
    /// - [`PageError::Verify`] if the message text differs (case and
    ///   whitespace sensitive).
    pub async fn attempt_add_product_and_expect_error(
        &mut self,
        selection: CartSelection,
        expected_message: &str,
    ) -> Result<(), PageError> {
        tracing::info!(
            product_id = %selection.product_id,
            amount = %selection.amount,
            expected_message,
            "adding product to cart, expecting refusal"
        );
        let cart_before = text_if_visible(&self.surface, Region::CartSummary).await?;
        self.submit_selection(&selection).await?;

        match wait_visible(&self.surface, Region::BuyMessage, self.waits).await {
            Ok(()) => {}
            Err(PageError::Timeout { condition, waited_ms }) => {
                let cart_after = text_if_visible(&self.surface, Region::CartSummary).await?;
                if cart_after != cart_before {
                    return Err(PageError::UnexpectedTransition {
                        expected: format!("the message \"{expected_message}\""),
                        observed: format!(
                            "the cart was updated to {:?}",
                            cart_after.unwrap_or_default()
                        ),
                    });
                }
                return Err(PageError::Timeout {
                    condition,
                    waited_ms,
                });
            }
            Err(e) => return Err(e),
        }

        expect_text(
            &self.surface,
            Region::BuyMessage,
            "buy message",
            expected_message,
            self.waits,
        )
        .await
    }
}

impl<S: StoreSurface> StorePage<S, Cart> {
    /// Leaves the cart for the checkout form.
    ///
    /// # Errors
    ///
    /// Propagates surface errors.
    pub async fn proceed_to_buy(mut self) -> Result<StorePage<S, Checkout>, PageError> {
        self.surface.submit_buy().await?;
        Ok(self.transition())
    }

    /// Current cart lines, once the cart summary is visible.
    ///
    /// # Errors
    ///
    /// [`PageError::Timeout`] if the cart summary never renders.
    pub async fn cart_summary(&self) -> Result<String, PageError> {
        visible_text(&self.surface, Region::CartSummary, self.waits).await
    }
}

impl<S: StoreSurface> StorePage<S, Checkout> {
    /// Fills buyer name and address and confirms the purchase.
    ///
    /// # Errors
    ///
    /// Propagates surface errors.
    pub async fn confirm_purchase(
        mut self,
        name: &str,
        address: &str,
    ) -> Result<StorePage<S, Receipt>, PageError> {
        self.surface.fill_buyer(name, address).await?;
        self.surface.submit_confirm_purchase().await?;
        tracing::info!(buyer = name, "purchase confirmed");
        Ok(self.transition())
    }
}

impl<S: StoreSurface> StorePage<S, Receipt> {
    async fn receipt_text(&self, region: Region) -> Result<String, PageError> {
        visible_text(&self.surface, region, self.waits).await
    }

    /// Checks subtotal, VAT and grand total against exact display strings.
    ///
    /// Each field is re-read until it matches or the wait elapses; every
    /// field still differing at that point is reported.
    ///
    /// # Errors
    ///
    /// - [`PageError::Timeout`] if a field never renders.
    /// - [`PageError::Verify`] with [`VerifyError::ReceiptMismatch`] listing
    ///   the differing fields.
    pub async fn validate_receipt_totals(
        &self,
        total: &str,
        vat: &str,
        grand_total: &str,
    ) -> Result<(), PageError> {
        let checks = [
            (Region::ReceiptTotal, "total", total),
            (Region::ReceiptVat, "vat", vat),
            (Region::ReceiptGrandTotal, "grand total", grand_total),
        ];

        let mut mismatches: Vec<FieldMismatch> = Vec::new();
        for (region, field, expected) in checks {
            match expect_text(&self.surface, region, field, expected, self.waits).await {
                Ok(()) => {}
                Err(PageError::Verify(VerifyError::FieldMismatch(m))) => mismatches.push(m),
                Err(e) => return Err(e),
            }
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(VerifyError::ReceiptMismatch { mismatches }.into())
        }
    }

    /// # Errors
    ///
    /// [`PageError::Timeout`] if the region never renders.
    pub async fn thank_you_message(&self) -> Result<String, PageError> {
        self.receipt_text(Region::ThankYouMessage).await
    }

    /// # Errors
    ///
    /// [`PageError::Timeout`] if the region never renders.
    pub async fn shipping_address(&self) -> Result<String, PageError> {
        self.receipt_text(Region::ReceiptAddress).await
    }

    /// # Errors
    ///
    /// [`PageError::Timeout`] if the region never renders.
    pub async fn line_items(&self) -> Result<String, PageError> {
        self.receipt_text(Region::ReceiptItems).await
    }

    /// # Errors
    ///
    /// [`PageError::Timeout`] if the region never renders.
    pub async fn grand_total(&self) -> Result<String, PageError> {
        self.receipt_text(Region::ReceiptGrandTotal).await
    }

    /// Reads every receipt region once.
    ///
    /// # Errors
    ///
    /// [`PageError::Timeout`] if any region never renders.
    pub async fn snapshot(&self) -> Result<ReceiptSnapshot, PageError> {
        Ok(ReceiptSnapshot::new(
            self.line_items().await?,
            self.receipt_text(Region::ReceiptTotal).await?,
            self.receipt_text(Region::ReceiptVat).await?,
            self.grand_total().await?,
            self.thank_you_message().await?,
            self.shipping_address().await?,
        ))
    }

    /// Snapshots the receipt and validates it against `expected`.
    ///
    /// # Errors
    ///
    /// [`PageError::Timeout`] if a region never renders,
    /// [`PageError::Verify`] on any field mismatch.
    pub async fn verify_receipt(&self, expected: &ExpectedReceipt) -> Result<(), PageError> {
        self.validate_receipt_totals(&expected.total, &expected.vat, &expected.grand_total)
            .await?;
        let snapshot = self.snapshot().await?;
        expected.validate(&snapshot)?;
        Ok(())
    }
}
