//! Integration tests for the store page model, driven by `FakeStorefront`.

use std::time::Duration;

use storecheck_core::{
    compare_records, normalize, CartSelection, Credentials, ScenarioFixtures, VerifyError,
};
use storecheck_page::{
    FakeStorefront, Listing, LoginPage, PageError, ScrapedRow, StorePage, StoreSurface, Waits,
};

fn quick_waits() -> Waits {
    Waits::new(Duration::from_millis(200), Duration::from_millis(10))
}

async fn store(surface: FakeStorefront) -> StorePage<FakeStorefront, Listing> {
    StorePage::navigate(surface, quick_waits())
        .await
        .expect("store should load")
}

fn malin() -> Credentials {
    Credentials {
        username: "malin".to_string(),
        password: "hunter2".to_string(),
        role: "consumer".to_string(),
    }
}

#[tokio::test]
async fn purchase_of_one_banana_renders_expected_receipt() {
    let page = store(FakeStorefront::reference()).await;

    let receipt = page
        .add_product_to_cart(CartSelection::new("2", "1"))
        .await
        .expect("add to cart")
        .proceed_to_buy()
        .await
        .expect("proceed to buy")
        .confirm_purchase("Malin", "Testgatan 1")
        .await
        .expect("confirm purchase");

    receipt
        .validate_receipt_totals("23", "4.7", "27.7")
        .await
        .expect("totals should match");
    assert_eq!(receipt.line_items().await.unwrap(), "1 x Banana - $23");
    assert_eq!(receipt.grand_total().await.unwrap(), "27.7");
    assert!(receipt
        .thank_you_message()
        .await
        .unwrap()
        .contains("Thank you for your purchase, Malin"));
    assert!(receipt
        .shipping_address()
        .await
        .unwrap()
        .contains("It will be shipped to: Testgatan 1"));

    let expected = ScenarioFixtures::default().purchase.expected;
    receipt
        .verify_receipt(&expected)
        .await
        .expect("receipt should match the default fixture");
}

#[tokio::test]
async fn receipt_total_mismatches_are_reported_together() {
    let receipt = store(FakeStorefront::reference())
        .await
        .add_product_to_cart(CartSelection::new("2", "1"))
        .await
        .unwrap()
        .proceed_to_buy()
        .await
        .unwrap()
        .confirm_purchase("Malin", "Testgatan 1")
        .await
        .unwrap();

    let err = receipt
        .validate_receipt_totals("23", "4.70", "27.70")
        .await
        .unwrap_err();

    let mismatches = match err {
        PageError::Verify(VerifyError::ReceiptMismatch { mismatches }) => mismatches,
        other => panic!("expected ReceiptMismatch, got {other:?}"),
    };
    let fields: Vec<_> = mismatches.iter().map(|m| m.field).collect();
    assert_eq!(fields, vec!["vat", "grand total"]);
    assert_eq!(mismatches[0].actual, "4.7");
    assert_eq!(mismatches[1].actual, "27.7");
}

#[tokio::test]
async fn insufficient_funds_shows_exact_message_and_keeps_cart_empty() {
    let mut page = store(FakeStorefront::reference()).await;

    page.attempt_add_product_and_expect_error(
        CartSelection::new("10", "50"),
        "Insufficient funds!",
    )
    .await
    .expect("refusal should be shown");

    assert!(page.surface().cart_lines().is_empty());
    assert!(!page
        .surface()
        .call_history
        .iter()
        .any(|c| c == "submit_buy"));
}

#[tokio::test]
async fn refusal_text_is_compared_exactly() {
    let mut page = store(FakeStorefront::reference()).await;

    let err = page
        .attempt_add_product_and_expect_error(
            CartSelection::new("10", "50"),
            "insufficient funds!",
        )
        .await
        .unwrap_err();

    let mismatch = match err {
        PageError::Verify(VerifyError::FieldMismatch(mismatch)) => mismatch,
        other => panic!("expected FieldMismatch, got {other:?}"),
    };
    assert_eq!(mismatch.expected, "insufficient funds!");
    assert_eq!(mismatch.actual, "Insufficient funds!");
}

#[tokio::test]
async fn missing_refusal_without_cart_change_times_out() {
    let mut page = store(FakeStorefront::reference().silently_rejecting()).await;

    let err = page
        .attempt_add_product_and_expect_error(
            CartSelection::new("10", "50"),
            "Insufficient funds!",
        )
        .await
        .unwrap_err();

    match err {
        PageError::Timeout { condition, waited_ms } => {
            assert!(condition.contains("buy message"), "condition: {condition}");
            assert_eq!(waited_ms, 200);
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn accepted_item_is_an_unexpected_transition() {
    let mut page = store(FakeStorefront::reference().with_unlimited_funds()).await;

    let err = page
        .attempt_add_product_and_expect_error(
            CartSelection::new("10", "50"),
            "Insufficient funds!",
        )
        .await
        .unwrap_err();

    match err {
        PageError::UnexpectedTransition { expected, observed } => {
            assert!(expected.contains("Insufficient funds!"));
            assert!(observed.contains("50 x TV"), "observed: {observed}");
        }
        other => panic!("expected UnexpectedTransition, got {other:?}"),
    }
}

#[tokio::test]
async fn refusal_leaves_page_usable_for_shopping() {
    let mut page = store(FakeStorefront::reference()).await;
    page.attempt_add_product_and_expect_error(
        CartSelection::new("10", "50"),
        "Insufficient funds!",
    )
    .await
    .unwrap();

    let cart = page
        .add_product_to_cart(CartSelection::new("2", "1"))
        .await
        .unwrap();
    assert_eq!(cart.cart_summary().await.unwrap(), "1 x Banana - $23");
}

#[tokio::test]
async fn add_to_cart_drives_select_amount_submit_in_order() {
    let cart = store(FakeStorefront::reference())
        .await
        .add_product_to_cart(CartSelection::new("2", "3"))
        .await
        .unwrap();

    assert_eq!(
        cart.surface().call_history,
        vec![
            "open_store",
            "select_product 2",
            "set_amount 3",
            "submit_add_to_cart"
        ]
    );
    assert_eq!(cart.state_name(), "cart");
}

#[tokio::test]
async fn unknown_product_surfaces_as_error() {
    let err = store(FakeStorefront::reference())
        .await
        .add_product_to_cart(CartSelection::new("404", "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::UnknownProduct { product_id } if product_id == "404"));
}

#[tokio::test]
async fn failed_navigation_is_fatal() {
    let surface = FakeStorefront::reference().failing_navigation();
    let err = StorePage::navigate(surface, quick_waits()).await.unwrap_err();
    assert!(matches!(err, PageError::Navigation { .. }));
}

#[tokio::test]
async fn scraped_banana_row_matches_api_record() {
    let rows = vec![ScrapedRow::new("Banana", "$23")];
    let page = store(FakeStorefront::reference().with_rows(rows)).await;

    let scraped = page.product_table_data().await.unwrap();
    let from_api = vec![normalize("Banana", "23")];

    assert_eq!(scraped[0].name, "banana");
    assert_eq!(scraped[0].price, "23");
    compare_records(&scraped, &from_api).expect("UI and API should agree");
}

#[tokio::test]
async fn empty_product_table_scrapes_to_nothing() {
    let page = store(FakeStorefront::reference().with_rows(Vec::new())).await;
    assert!(page.product_table_data().await.unwrap().is_empty());
}

#[tokio::test]
async fn reordered_rows_do_not_match() {
    let page = store(FakeStorefront::reference()).await;
    let scraped = page.product_table_data().await.unwrap();
    let reversed: Vec<_> = scraped.iter().rev().cloned().collect();

    let err = compare_records(&scraped, &reversed).unwrap_err();
    assert!(matches!(err, VerifyError::ContentMismatch { index: 0, .. }));
}

#[tokio::test]
async fn scraping_does_not_touch_the_page() {
    let page = store(FakeStorefront::reference()).await;
    let before = page.surface().call_history.clone();
    let _ = page.product_table_data().await.unwrap();
    assert_eq!(page.surface().call_history, before);
}

#[tokio::test]
async fn login_lands_on_store() {
    let surface = FakeStorefront::reference().with_login(malin());
    let page = LoginPage::open(surface, quick_waits())
        .await
        .unwrap()
        .log_in(&malin())
        .await
        .expect("login should reach the store");

    let url = page.surface().current_url().await.unwrap();
    assert!(storecheck_page::is_store_landing(&url), "landed on {url}");
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let surface = FakeStorefront::reference().with_login(malin());
    let wrong = Credentials {
        password: "nope".to_string(),
        ..malin()
    };

    let err = LoginPage::open(surface, quick_waits())
        .await
        .unwrap()
        .log_in(&wrong)
        .await
        .unwrap_err();

    match err {
        PageError::LoginRejected { url } => assert!(url.ends_with('/')),
        other => panic!("expected LoginRejected, got {other:?}"),
    }
}
