//! Marketplace seller API clients and the shared sync pipeline.
//!
//! Both platforms follow the same flow: list every offer the store
//! carries, reconcile the listing against the supplier stock file, then
//! push stock and price batches at the platform's own limits. The
//! clients differ only in endpoints, payload shapes, pagination signals
//! and batch limits.

pub mod ozon;
pub mod yandex;

pub use ozon::OzonApi;
pub use yandex::YandexApi;

use crate::batch::chunks;
use crate::error::Result;
use crate::reconcile::{reconcile, PriceUpdate, StockUpdate};
use crate::stock_file::StockRecord;

/// One marketplace seller API.
#[allow(async_fn_in_trait)]
pub trait Marketplace {
    /// Largest stock batch the platform accepts in one call.
    const STOCK_BATCH: usize;
    /// Largest price batch the platform accepts in one call.
    const PRICE_BATCH: usize;

    /// Store label for logs.
    fn name(&self) -> &str;

    /// Warehouse the stock updates are scoped to, when the platform
    /// tracks stock per warehouse.
    fn warehouse_id(&self) -> Option<&str> {
        None
    }

    /// Fetches the ids of every offer listed in the store, following the
    /// platform's pagination until exhausted.
    async fn fetch_offer_ids(&self) -> Result<Vec<String>>;

    /// Submits one batch of stock updates.
    async fn submit_stocks(&self, batch: &[StockUpdate]) -> Result<()>;

    /// Submits one batch of price updates.
    async fn submit_prices(&self, batch: &[PriceUpdate]) -> Result<()>;
}

/// Counters from one marketplace sync run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Offers listed in the store.
    pub listed_offers: usize,
    /// Stock updates submitted (one per listed offer).
    pub stocks_sent: usize,
    /// Stock updates with a non-zero quantity.
    pub in_stock: usize,
    /// Price updates submitted.
    pub prices_sent: usize,
}

/// Pushes current stock levels and prices for every offer listed on the
/// given marketplace.
///
/// Batches are submitted strictly in order, one call at a time. A failing
/// call aborts the run; batches already accepted stay applied.
pub async fn sync_marketplace<M: Marketplace>(
    api: &M,
    records: &[StockRecord],
) -> Result<SyncReport> {
    log::info!("{}: fetching offer list", api.name());
    let offer_ids = api.fetch_offer_ids().await?;
    log::info!("{}: {} offers listed", api.name(), offer_ids.len());

    let (stocks, prices) = reconcile(records, &offer_ids, api.warehouse_id())?;
    let in_stock = stocks.iter().filter(|stock| stock.quantity != 0).count();

    for batch in chunks(&stocks, M::STOCK_BATCH)? {
        api.submit_stocks(batch).await?;
    }
    log::info!(
        "{}: submitted {} stock updates ({} in stock)",
        api.name(),
        stocks.len(),
        in_stock
    );

    for batch in chunks(&prices, M::PRICE_BATCH)? {
        api.submit_prices(batch).await?;
    }
    log::info!("{}: submitted {} price updates", api.name(), prices.len());

    Ok(SyncReport {
        listed_offers: offer_ids.len(),
        stocks_sent: stocks.len(),
        in_stock,
        prices_sent: prices.len(),
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
