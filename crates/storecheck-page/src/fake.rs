//! In-memory storefront implementing [`StoreSurface`].
//!
//! Models just enough of the store for the page model and scenarios to run
//! without a browser: a product catalogue with prices and VAT, a cart bounded
//! by available funds, the checkout form and the receipt. Knobs let tests make
//! it misbehave (silently ignore an add-to-cart, render a different table,
//! fail to load).

use async_trait::async_trait;
use rust_decimal::Decimal;
use storecheck_core::Credentials;

use crate::error::PageError;
use crate::surface::{Region, ScrapedRow, StoreSurface};

const INSUFFICIENT_FUNDS: &str = "Insufficient funds!";
const INVALID_AMOUNT: &str = "Please enter a valid amount";

/// One sellable item in the fake catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeProduct {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub vat: Decimal,
}

impl FakeProduct {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, vat: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            vat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Blank,
    Login,
    Store,
    Checkout,
    Receipt,
}

#[derive(Debug, Clone)]
struct CartLine {
    product: FakeProduct,
    quantity: u32,
}

impl CartLine {
    fn line_price(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    fn line_vat(&self) -> Decimal {
        self.product.vat * Decimal::from(self.quantity)
    }

    fn display(&self) -> String {
        format!(
            "{} x {} - ${}",
            self.quantity,
            self.product.name,
            self.line_price().normalize()
        )
    }
}

/// A scripted store with a call history for verification.
#[derive(Debug)]
pub struct FakeStorefront {
    origin: String,
    products: Vec<FakeProduct>,
    funds: Decimal,
    accepted_login: Option<Credentials>,
    view: View,
    url: String,
    selected: Option<String>,
    amount: String,
    cart: Vec<CartLine>,
    buy_message: Option<String>,
    buyer: Option<(String, String)>,
    rows_override: Option<Vec<ScrapedRow>>,
    silently_reject: bool,
    fail_navigation: bool,
    /// Actions performed, in order, e.g. `"select_product 2"`.
    pub call_history: Vec<String>,
}

impl FakeStorefront {
    #[must_use]
    pub fn new(products: Vec<FakeProduct>, funds: Decimal) -> Self {
        Self {
            origin: "http://store.test".to_string(),
            products,
            funds,
            accepted_login: None,
            view: View::Blank,
            url: "about:blank".to_string(),
            selected: None,
            amount: String::new(),
            cart: Vec::new(),
            buy_message: None,
            buyer: None,
            rows_override: None,
            silently_reject: false,
            fail_navigation: false,
            call_history: Vec::new(),
        }
    }

    /// Banana (id 2, $23, VAT 4.7) and a TV (id 10, $1999, VAT 399.8) with
    /// $1000 of funds: one banana is affordable, fifty TVs are not.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(
            vec![
                FakeProduct::new("2", "Banana", Decimal::new(23, 0), Decimal::new(47, 1)),
                FakeProduct::new("10", "TV", Decimal::new(1999, 0), Decimal::new(3998, 1)),
            ],
            Decimal::new(1000, 0),
        )
    }

    /// Only these credentials will reach the store after login.
    #[must_use]
    pub fn with_login(mut self, credentials: Credentials) -> Self {
        self.accepted_login = Some(credentials);
        self
    }

    /// Render these rows instead of the catalogue.
    #[must_use]
    pub fn with_rows(mut self, rows: Vec<ScrapedRow>) -> Self {
        self.rows_override = Some(rows);
        self
    }

    /// Ignore unaffordable add-to-cart submissions without showing a message.
    #[must_use]
    pub fn silently_rejecting(mut self) -> Self {
        self.silently_reject = true;
        self
    }

    /// Accept every add-to-cart regardless of funds.
    #[must_use]
    pub fn with_unlimited_funds(mut self) -> Self {
        self.funds = Decimal::MAX;
        self
    }

    #[must_use]
    pub fn failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    #[must_use]
    pub fn cart_lines(&self) -> Vec<String> {
        self.cart.iter().map(CartLine::display).collect()
    }

    fn record(&mut self, call: impl Into<String>) {
        self.call_history.push(call.into());
    }

    fn require_view(&self, views: &[View], control: &str) -> Result<(), PageError> {
        if views.contains(&self.view) {
            Ok(())
        } else {
            Err(PageError::Driver(format!(
                "{control} is not present on the current view ({:?})",
                self.view
            )))
        }
    }

    fn cart_total(&self) -> Decimal {
        self.cart.iter().map(CartLine::line_price).sum()
    }

    fn cart_vat(&self) -> Decimal {
        self.cart.iter().map(CartLine::line_vat).sum()
    }

    fn buyer_name(&self) -> &str {
        self.buyer.as_ref().map_or("", |(name, _)| name.as_str())
    }

    fn buyer_address(&self) -> &str {
        self.buyer.as_ref().map_or("", |(_, address)| address.as_str())
    }
}

#[async_trait]
impl StoreSurface for FakeStorefront {
    async fn open_store(&mut self) -> Result<(), PageError> {
        self.record("open_store");
        let url = format!("{}/store2/", self.origin);
        if self.fail_navigation {
            return Err(PageError::Navigation {
                url,
                reason: "connection refused".to_string(),
            });
        }
        self.view = View::Store;
        self.url = url;
        self.selected = None;
        self.amount.clear();
        self.buy_message = None;
        Ok(())
    }

    async fn open_login(&mut self) -> Result<(), PageError> {
        self.record("open_login");
        let url = format!("{}/", self.origin);
        if self.fail_navigation {
            return Err(PageError::Navigation {
                url,
                reason: "connection refused".to_string(),
            });
        }
        self.view = View::Login;
        self.url = url;
        Ok(())
    }

    async fn log_in(&mut self, credentials: &Credentials) -> Result<(), PageError> {
        self.record(format!("log_in {}", credentials.username));
        self.require_view(&[View::Login], "login form")?;
        if self.accepted_login.as_ref() == Some(credentials) {
            self.view = View::Store;
            self.url = format!("{}/store2/", self.origin);
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String, PageError> {
        Ok(self.url.clone())
    }

    async fn select_product(&mut self, product_id: &str) -> Result<(), PageError> {
        self.record(format!("select_product {product_id}"));
        self.require_view(&[View::Store], "product select")?;
        if !self.products.iter().any(|p| p.id == product_id) {
            return Err(PageError::UnknownProduct {
                product_id: product_id.to_string(),
            });
        }
        self.selected = Some(product_id.to_string());
        Ok(())
    }

    async fn set_amount(&mut self, amount: &str) -> Result<(), PageError> {
        self.record(format!("set_amount {amount}"));
        self.require_view(&[View::Store], "amount input")?;
        amount.clone_into(&mut self.amount);
        Ok(())
    }

    async fn submit_add_to_cart(&mut self) -> Result<(), PageError> {
        self.record("submit_add_to_cart");
        self.require_view(&[View::Store], "add to cart button")?;

        let product = self
            .selected
            .as_ref()
            .and_then(|id| self.products.iter().find(|p| &p.id == id))
            .cloned();
        let (Some(product), Ok(quantity)) = (product, self.amount.trim().parse::<u32>()) else {
            self.buy_message = Some(INVALID_AMOUNT.to_string());
            return Ok(());
        };
        if quantity == 0 {
            self.buy_message = Some(INVALID_AMOUNT.to_string());
            return Ok(());
        }

        let line = CartLine { product, quantity };
        let cost = self.cart_total() + line.line_price() + self.cart_vat() + line.line_vat();
        if cost > self.funds {
            if !self.silently_reject {
                self.buy_message = Some(INSUFFICIENT_FUNDS.to_string());
            }
            return Ok(());
        }

        self.buy_message = None;
        self.cart.push(line);
        Ok(())
    }

    async fn submit_buy(&mut self) -> Result<(), PageError> {
        self.record("submit_buy");
        self.require_view(&[View::Store], "buy button")?;
        if self.cart.is_empty() {
            return Err(PageError::Driver("buy button is disabled".to_string()));
        }
        self.view = View::Checkout;
        Ok(())
    }

    async fn fill_buyer(&mut self, name: &str, address: &str) -> Result<(), PageError> {
        self.record(format!("fill_buyer {name} / {address}"));
        self.require_view(&[View::Checkout], "buyer form")?;
        self.buyer = Some((name.to_string(), address.to_string()));
        Ok(())
    }

    async fn submit_confirm_purchase(&mut self) -> Result<(), PageError> {
        self.record("submit_confirm_purchase");
        self.require_view(&[View::Checkout], "confirm purchase button")?;
        if self.buyer.is_none() {
            return Err(PageError::Driver("buyer form is incomplete".to_string()));
        }
        self.view = View::Receipt;
        Ok(())
    }

    async fn is_visible(&self, region: Region) -> Result<bool, PageError> {
        let visible = match region {
            Region::BuyMessage => self.view == View::Store && self.buy_message.is_some(),
            Region::CartSummary => {
                matches!(self.view, View::Store | View::Checkout) && !self.cart.is_empty()
            }
            _ => self.view == View::Receipt,
        };
        Ok(visible)
    }

    async fn read_text(&self, region: Region) -> Result<String, PageError> {
        if !self.is_visible(region).await? {
            return Err(PageError::RegionMissing { region });
        }
        let text = match region {
            Region::BuyMessage => self.buy_message.clone().unwrap_or_default(),
            Region::CartSummary | Region::ReceiptItems => self.cart_lines().join("\n"),
            Region::ReceiptTotal => self.cart_total().normalize().to_string(),
            Region::ReceiptVat => self.cart_vat().normalize().to_string(),
            Region::ReceiptGrandTotal => (self.cart_total() + self.cart_vat())
                .normalize()
                .to_string(),
            Region::ThankYouMessage => {
                format!("Thank you for your purchase, {}", self.buyer_name())
            }
            Region::ReceiptAddress => {
                format!("It will be shipped to: {}", self.buyer_address())
            }
        };
        Ok(text)
    }

    async fn product_rows(&self) -> Result<Vec<ScrapedRow>, PageError> {
        if let Some(rows) = &self.rows_override {
            return Ok(rows.clone());
        }
        if matches!(self.view, View::Blank | View::Login) {
            return Ok(Vec::new());
        }
        Ok(self
            .products
            .iter()
            .map(|p| ScrapedRow::new(p.name.clone(), format!("${}", p.price.normalize())))
            .collect())
    }
}
