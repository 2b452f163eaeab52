//! Tests for the stock file field normalization rules.

use super::*;
use crate::error::SyncError;

// ── normalize_quantity ───────────────────────────────────────────────

#[test]
fn capped_quantity_becomes_plentiful() {
    assert_eq!(normalize_quantity(">10").unwrap(), 100);
}

#[test]
fn quantity_of_one_is_not_trusted() {
    assert_eq!(normalize_quantity("1").unwrap(), 0);
}

#[test]
fn plain_numbers_pass_through() {
    assert_eq!(normalize_quantity("0").unwrap(), 0);
    assert_eq!(normalize_quantity("2").unwrap(), 2);
    assert_eq!(normalize_quantity("5").unwrap(), 5);
    assert_eq!(normalize_quantity("10").unwrap(), 10);
}

#[test]
fn garbage_quantity_is_an_error() {
    for raw in [">11", "many", "", "1.5", "5 шт."] {
        match normalize_quantity(raw) {
            Err(SyncError::BadQuantity(reported)) => assert_eq!(reported, raw),
            other => panic!("Expected BadQuantity for '{raw}', got: {other:?}"),
        }
    }
}

// ── normalize_price ──────────────────────────────────────────────────

#[test]
fn display_price_is_stripped_to_digits() {
    assert_eq!(normalize_price("5'990.00 руб."), "5990");
}

#[test]
fn bare_number_is_unchanged() {
    assert_eq!(normalize_price("123"), "123");
}

#[test]
fn fraction_after_first_dot_is_dropped() {
    assert_eq!(normalize_price("1 200.50"), "1200");
    assert_eq!(normalize_price("99.99.99"), "99");
}

#[test]
fn no_digits_before_dot_yields_empty() {
    assert_eq!(normalize_price(".50"), "");
    assert_eq!(normalize_price("руб."), "");
    assert_eq!(normalize_price(""), "");
}
