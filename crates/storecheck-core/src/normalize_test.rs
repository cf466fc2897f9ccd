use proptest::prelude::*;

use super::*;

// -----------------------------------------------------------------------
// normalize
// -----------------------------------------------------------------------

#[test]
fn normalize_lowercases_and_trims_name() {
    let record = normalize("  Banana \n", "23");
    assert_eq!(record.name, "banana");
}

#[test]
fn normalize_keeps_inner_whitespace_in_name() {
    let record = normalize("Flat Screen TV", "23");
    assert_eq!(record.name, "flat screen tv");
}

#[test]
fn normalize_strips_currency_symbol() {
    assert_eq!(normalize("Banana", "$23").price, "23");
}

#[test]
fn normalize_price_formatting_variants_collapse() {
    for raw in ["$23", " 23 ", "23", "23 kr", "\t$ 23\n"] {
        assert_eq!(normalize("Banana", raw).price, "23", "raw price {raw:?}");
    }
}

#[test]
fn normalize_keeps_decimal_point() {
    assert_eq!(normalize("Apple", "$23.50").price, "23.50");
}

#[test]
fn normalize_strips_thousands_separator() {
    assert_eq!(normalize("TV", "$1,299").price, "1299");
}

#[test]
fn normalize_empty_price_yields_empty_string() {
    assert_eq!(normalize("TV", "N/A").price, "");
}

#[test]
fn normalize_lowercases_non_ascii_names() {
    assert_eq!(normalize("ÄPPLE", "5").name, "äpple");
}

#[test]
fn normalize_example_row_matches_api_record() {
    let ui = normalize("Banana", "$23");
    let api = normalize("Banana", &canonical_price(23.0));
    assert_eq!(ui, api);
    assert_eq!(
        ui,
        ProductRecord {
            name: "banana".to_owned(),
            price: "23".to_owned(),
        }
    );
}

// -----------------------------------------------------------------------
// canonical_price
// -----------------------------------------------------------------------

#[test]
fn canonical_price_whole_number_has_no_fraction() {
    assert_eq!(canonical_price(23.0), "23");
}

#[test]
fn canonical_price_keeps_shortest_fraction() {
    assert_eq!(canonical_price(4.7), "4.7");
    assert_eq!(canonical_price(27.7), "27.7");
    assert_eq!(canonical_price(23.5), "23.5");
}

// -----------------------------------------------------------------------
// properties
// -----------------------------------------------------------------------

proptest! {
    #[test]
    fn normalize_is_idempotent(name in ".*", price in ".*") {
        let once = normalize(&name, &price);
        let twice = normalize(&once.name, &once.price);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_price_contains_only_digits_and_dots(price in ".*") {
        let record = normalize("x", &price);
        prop_assert!(record.price.chars().all(|c| c.is_ascii_digit() || c == '.'));
    }

    #[test]
    fn currency_and_padding_do_not_change_price(value in 0u32..1_000_000, pad in "[ \t]{0,3}") {
        let plain = normalize("x", &value.to_string());
        let decorated = normalize("x", &format!("{pad}${value}{pad}"));
        prop_assert_eq!(plain, decorated);
    }
}
