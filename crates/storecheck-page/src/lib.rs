//! Store page model for the storefront verification harness.
//!
//! Scenarios drive the store through [`StorePage`], whose state parameter
//! tracks the purchase flow. Browser engines plug in by implementing
//! [`StoreSurface`]: [`FakeStorefront`] runs in memory and, with the
//! `webdriver` feature, `WebDriverSurface` drives a real browser.

pub mod error;
pub mod fake;
pub mod login;
pub mod scrape;
pub mod store;
pub mod surface;
pub mod wait;
#[cfg(feature = "webdriver")]
pub mod webdriver;

pub use error::PageError;
pub use fake::{FakeProduct, FakeStorefront};
pub use login::{is_store_landing, LoginPage};
pub use scrape::{normalize_rows, scrape_product_table};
pub use store::{Cart, Checkout, Listing, PageState, Receipt, Shopping, StorePage};
pub use surface::{Region, ScrapedRow, StoreSurface};
pub use wait::Waits;
#[cfg(feature = "webdriver")]
pub use webdriver::{Selectors, Target, WebDriverSurface};
