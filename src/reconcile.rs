//! Builds stock and price updates from the supplier file and the
//! marketplace listing.

use std::collections::HashSet;

use crate::error::Result;
use crate::normalize::{normalize_price, normalize_quantity};
use crate::stock_file::StockRecord;

/// A stock level ready for submission. Every offer the marketplace lists
/// gets exactly one of these per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    pub offer_id: String,
    pub quantity: i64,
    /// Warehouse scope, for platforms that track stock per warehouse.
    pub warehouse_id: Option<String>,
}

/// A price ready for submission. Only offers matched in the stock file
/// get one; prices are never zeroed for unmatched offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceUpdate {
    pub offer_id: String,
    /// Integer price in roubles.
    pub price: i64,
}

/// Matches the stock file against the marketplace listing.
///
/// Every record whose code is listed yields a [`StockUpdate`] with its
/// normalized quantity and, when the price is usable, a [`PriceUpdate`].
/// Listed offers absent from the stock file are reported as sold out.
/// The resulting stock batch covers exactly the listed offer ids:
/// matched records first in record order, then the never-matched
/// remainder in listing order. Inputs are not modified; a second call
/// with the same arguments produces the same output.
pub fn reconcile(
    records: &[StockRecord],
    offer_ids: &[String],
    warehouse_id: Option<&str>,
) -> Result<(Vec<StockUpdate>, Vec<PriceUpdate>)> {
    let listed: HashSet<&str> = offer_ids.iter().map(String::as_str).collect();
    let mut matched: HashSet<&str> = HashSet::new();

    let mut stocks = Vec::new();
    let mut prices = Vec::new();

    for record in records {
        let code = record.code.as_str();
        // At most one match per code; repeated rows are ignored.
        if !listed.contains(code) || matched.contains(code) {
            continue;
        }
        matched.insert(code);

        stocks.push(StockUpdate {
            offer_id: record.code.clone(),
            quantity: normalize_quantity(&record.quantity)?,
            warehouse_id: warehouse_id.map(str::to_string),
        });

        match normalize_price(&record.price).parse::<i64>() {
            Ok(price) => prices.push(PriceUpdate {
                offer_id: record.code.clone(),
                price,
            }),
            Err(_) => {
                log::warn!(
                    "No usable price for {} ('{}'), skipping price update",
                    record.code,
                    record.price
                );
            }
        }
    }

    // Listed offers the stock file never mentioned are sold out.
    for offer_id in offer_ids {
        if !matched.contains(offer_id.as_str()) {
            stocks.push(StockUpdate {
                offer_id: offer_id.clone(),
                quantity: 0,
                warehouse_id: warehouse_id.map(str::to_string),
            });
        }
    }

    Ok((stocks, prices))
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
