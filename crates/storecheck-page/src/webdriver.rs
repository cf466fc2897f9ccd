//! [`StoreSurface`] over a WebDriver session (geckodriver, chromedriver).
//!
//! All locators live in [`Selectors`]; the defaults target the reference
//! storefront's markup.

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use storecheck_core::Credentials;

use crate::error::PageError;
use crate::surface::{Region, ScrapedRow, StoreSurface};

/// How to find one element: a CSS selector or an XPath expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Css(String),
    XPath(String),
}

impl Target {
    fn css(selector: &str) -> Self {
        Self::Css(selector.to_string())
    }

    fn xpath(expr: &str) -> Self {
        Self::XPath(expr.to_string())
    }

    /// Element with an accessible name given by its own label or a `<label>`.
    fn labelled(tag: &str, label: &str) -> Self {
        Self::XPath(format!(
            "//{tag}[@aria-label='{label}' or @id=//label[normalize-space()='{label}']/@for] \
             | //label[normalize-space()='{label}']//{tag}"
        ))
    }

    fn button(name: &str) -> Self {
        Self::XPath(format!(
            "//button[normalize-space()='{name}'] | //input[@type='submit' and @value='{name}']"
        ))
    }

    fn locator(&self) -> Locator<'_> {
        match self {
            Target::Css(s) => Locator::Css(s),
            Target::XPath(s) => Locator::XPath(s),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Css(s) => write!(f, "css `{s}`"),
            Target::XPath(s) => write!(f, "xpath `{s}`"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Selectors {
    pub product_select: Target,
    pub amount_input: Target,
    pub add_to_cart: Target,
    pub buy_button: Target,
    pub buy_message: Target,
    pub product_rows: Target,
    pub cart_items: Target,
    pub name_input: Target,
    pub address_input: Target,
    pub confirm_purchase: Target,
    pub receipt_items: Target,
    pub receipt_total: Target,
    pub receipt_vat: Target,
    pub receipt_grand_total: Target,
    pub thank_you: Target,
    pub receipt_address: Target,
    pub login_username: Target,
    pub login_password: Target,
    pub login_role: Target,
    pub login_submit: Target,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            product_select: Target::css(r#"[data-testid="select-product"]"#),
            amount_input: Target::labelled("input", "Amount"),
            add_to_cart: Target::css(r#"[data-testid="add-to-cart-button"]"#),
            buy_button: Target::button("Buy"),
            buy_message: Target::css(r#"[data-testid="buy-message"]"#),
            product_rows: Target::css("#productList tr"),
            cart_items: Target::xpath("//li | //*[@role='listitem']"),
            name_input: Target::labelled("input", "Name:"),
            address_input: Target::labelled("input", "Address:"),
            confirm_purchase: Target::button("Confirm Purchase"),
            receipt_items: Target::css("#receiptItems"),
            receipt_total: Target::css("#receiptTotal"),
            receipt_vat: Target::css("#receiptVAT"),
            receipt_grand_total: Target::css(r#"[data-testid="receiptGrandTotal"]"#),
            thank_you: Target::css("#name"),
            receipt_address: Target::css("#address"),
            login_username: Target::css("#username"),
            login_password: Target::css("#password"),
            login_role: Target::css("#role"),
            login_submit: Target::css(r#"button[type="submit"]"#),
        }
    }
}

impl Selectors {
    fn region(&self, region: Region) -> &Target {
        match region {
            Region::BuyMessage => &self.buy_message,
            Region::CartSummary => &self.cart_items,
            Region::ReceiptItems => &self.receipt_items,
            Region::ReceiptTotal => &self.receipt_total,
            Region::ReceiptVat => &self.receipt_vat,
            Region::ReceiptGrandTotal => &self.receipt_grand_total,
            Region::ThankYouMessage => &self.thank_you,
            Region::ReceiptAddress => &self.receipt_address,
        }
    }
}

fn driver_error(action: &str, target: &Target, err: &CmdError) -> PageError {
    PageError::Driver(format!("{action} {target}: {err}"))
}

/// A live browser session on the storefront. Clones share the session.
#[derive(Clone)]
pub struct WebDriverSurface {
    client: Client,
    store_url: String,
    login_url: String,
    selectors: Selectors,
}

impl std::fmt::Debug for WebDriverSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDriverSurface")
            .field("store_url", &self.store_url)
            .field("login_url", &self.login_url)
            .finish_non_exhaustive()
    }
}

impl WebDriverSurface {
    /// Opens a new browser session through the WebDriver server at
    /// `webdriver_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Driver`] if no session can be created.
    pub async fn connect(
        webdriver_url: &str,
        store_url: impl Into<String>,
        login_url: impl Into<String>,
    ) -> Result<Self, PageError> {
        let client = ClientBuilder::rustls()
            .map_err(|e| PageError::Driver(format!("TLS setup failed: {e}")))?
            .connect(webdriver_url)
            .await
            .map_err(|e| {
                PageError::Driver(format!("cannot start session at {webdriver_url}: {e}"))
            })?;
        tracing::info!(webdriver_url, "webdriver session started");
        Ok(Self {
            client,
            store_url: store_url.into(),
            login_url: login_url.into(),
            selectors: Selectors::default(),
        })
    }

    /// # Errors
    ///
    /// See [`WebDriverSurface::connect`].
    pub async fn from_config(config: &storecheck_core::AppConfig) -> Result<Self, PageError> {
        Self::connect(&config.webdriver_url, config.store_url(), config.login_url()).await
    }

    #[must_use]
    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Ends the browser session.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Driver`] if the session cannot be closed cleanly.
    pub async fn close(self) -> Result<(), PageError> {
        self.client
            .close()
            .await
            .map_err(|e| PageError::Driver(format!("closing session: {e}")))
    }

    async fn goto(&self, url: &str) -> Result<(), PageError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| PageError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(url, "navigated");
        Ok(())
    }

    async fn find(&self, target: &Target) -> Result<Element, PageError> {
        self.client
            .find(target.locator())
            .await
            .map_err(|e| driver_error("locating", target, &e))
    }

    async fn click(&self, target: &Target) -> Result<(), PageError> {
        self.find(target)
            .await?
            .click()
            .await
            .map_err(|e| driver_error("clicking", target, &e))
    }

    async fn fill(&self, target: &Target, value: &str) -> Result<(), PageError> {
        let element = self.find(target).await?;
        element
            .clear()
            .await
            .map_err(|e| driver_error("clearing", target, &e))?;
        element
            .send_keys(value)
            .await
            .map_err(|e| driver_error("typing into", target, &e))
    }

    async fn region_elements(&self, region: Region) -> Result<Vec<Element>, PageError> {
        let target = self.selectors.region(region);
        self.client
            .find_all(target.locator())
            .await
            .map_err(|e| driver_error("locating", target, &e))
    }
}

#[async_trait]
impl StoreSurface for WebDriverSurface {
    async fn open_store(&mut self) -> Result<(), PageError> {
        let url = self.store_url.clone();
        self.goto(&url).await?;
        // The select is rendered by script after load.
        self.client
            .wait()
            .for_element(self.selectors.product_select.locator())
            .await
            .map_err(|e| PageError::Navigation {
                url,
                reason: format!("store view never became ready: {e}"),
            })?;
        Ok(())
    }

    async fn open_login(&mut self) -> Result<(), PageError> {
        let url = self.login_url.clone();
        self.goto(&url).await
    }

    async fn log_in(&mut self, credentials: &Credentials) -> Result<(), PageError> {
        self.fill(&self.selectors.login_username, &credentials.username)
            .await?;
        self.fill(&self.selectors.login_password, &credentials.password)
            .await?;
        let target = &self.selectors.login_role;
        self.find(target)
            .await?
            .select_by_value(&credentials.role)
            .await
            .map_err(|e| driver_error("choosing role in", target, &e))?;
        self.click(&self.selectors.login_submit).await
    }

    async fn current_url(&self) -> Result<String, PageError> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(|e| PageError::Driver(format!("reading current url: {e}")))
    }

    async fn select_product(&mut self, product_id: &str) -> Result<(), PageError> {
        let target = &self.selectors.product_select;
        match self.find(target).await?.select_by_value(product_id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_no_such_element() => Err(PageError::UnknownProduct {
                product_id: product_id.to_string(),
            }),
            Err(e) => Err(driver_error("selecting product in", target, &e)),
        }
    }

    async fn set_amount(&mut self, amount: &str) -> Result<(), PageError> {
        self.fill(&self.selectors.amount_input, amount).await
    }

    async fn submit_add_to_cart(&mut self) -> Result<(), PageError> {
        self.click(&self.selectors.add_to_cart).await
    }

    async fn submit_buy(&mut self) -> Result<(), PageError> {
        self.click(&self.selectors.buy_button).await
    }

    async fn fill_buyer(&mut self, name: &str, address: &str) -> Result<(), PageError> {
        self.fill(&self.selectors.name_input, name).await?;
        self.fill(&self.selectors.address_input, address).await
    }

    async fn submit_confirm_purchase(&mut self) -> Result<(), PageError> {
        self.click(&self.selectors.confirm_purchase).await
    }

    async fn is_visible(&self, region: Region) -> Result<bool, PageError> {
        let target = self.selectors.region(region);
        for element in self.region_elements(region).await? {
            let displayed = element
                .is_displayed()
                .await
                .map_err(|e| driver_error("checking visibility of", target, &e))?;
            if displayed {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn read_text(&self, region: Region) -> Result<String, PageError> {
        let target = self.selectors.region(region);
        let elements = self.region_elements(region).await?;
        if elements.is_empty() {
            return Err(PageError::RegionMissing { region });
        }
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            let text = element
                .text()
                .await
                .map_err(|e| driver_error("reading", target, &e))?;
            texts.push(text.trim().to_string());
        }
        Ok(texts.join("\n"))
    }

    async fn product_rows(&self) -> Result<Vec<ScrapedRow>, PageError> {
        let target = &self.selectors.product_rows;
        let rows = self
            .client
            .find_all(target.locator())
            .await
            .map_err(|e| driver_error("locating", target, &e))?;

        let mut scraped = Vec::with_capacity(rows.len());
        for row in rows {
            let cells = row
                .find_all(Locator::Css("td"))
                .await
                .map_err(|e| driver_error("reading cells of", target, &e))?;
            // Header rows use <th> and carry no product.
            let (Some(name_cell), Some(price_cell)) = (cells.first(), cells.get(1)) else {
                continue;
            };
            let name = name_cell
                .text()
                .await
                .map_err(|e| driver_error("reading", target, &e))?;
            let price = price_cell
                .text()
                .await
                .map_err(|e| driver_error("reading", target, &e))?;
            scraped.push(ScrapedRow::new(name, price));
        }
        Ok(scraped)
    }
}
