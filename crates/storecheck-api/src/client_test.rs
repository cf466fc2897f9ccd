use super::*;

fn client(base: &str) -> StoreApiClient {
    StoreApiClient::new(base, 5, 0, 0).expect("client should build")
}

#[test]
fn product_list_url_appends_to_prefix() {
    let url = client("http://localhost:3000/store2/api/v1")
        .product_list_url()
        .unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/store2/api/v1/product/list");
}

#[test]
fn product_list_url_tolerates_trailing_slash() {
    let url = client("http://localhost:3000/store2/api/v1/")
        .product_list_url()
        .unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/store2/api/v1/product/list");
}

#[test]
fn price_url_uses_product_id_segment() {
    let url = client("http://localhost:3000/store2/api/v1")
        .price_url("10")
        .unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/store2/api/v1/price/10");
}

#[test]
fn price_url_escapes_path_characters() {
    let url = client("http://localhost:3000/api").price_url("a/b").unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/api/price/a%2Fb");
}

#[test]
fn rejects_unparseable_base_url() {
    let result = StoreApiClient::new("not a url", 5, 0, 0);
    assert!(
        matches!(result, Err(ApiError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}
