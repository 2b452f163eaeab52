//! Normalization rules for raw stock file fields.
//!
//! The supplier export carries quantity and price as display strings;
//! these helpers map them to values the marketplace APIs accept.

use crate::error::{Result, SyncError};

/// Quantity the supplier caps its report at.
const CAPPED_QUANTITY: &str = ">10";

/// Published stock level for a capped quantity.
const CAPPED_STOCK: i64 = 100;

/// Converts a raw quantity string to a stock count.
///
/// The supplier stops counting above ten and reports `">10"`; that is
/// published as 100. A reported count of exactly `"1"` is not trusted
/// upstream and is published as zero. Anything else must be a base-10
/// integer.
pub fn normalize_quantity(raw: &str) -> Result<i64> {
    match raw {
        CAPPED_QUANTITY => Ok(CAPPED_STOCK),
        "1" => Ok(0),
        other => other
            .parse::<i64>()
            .map_err(|_| SyncError::BadQuantity(other.to_string())),
    }
}

/// Strips a price string down to its integer part as a digit string.
///
/// Takes the prefix before the first `.` and drops every non-digit
/// character: `"5'990.00 руб."` becomes `"5990"`. A price with no digits
/// before the first `.` yields an empty string, which callers must treat
/// as "no usable price".
pub fn normalize_price(raw: &str) -> String {
    raw.split('.')
        .next()
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
