//! Market Sync - supplier stock and price uploader
//!
//! This library downloads a supplier stock archive and reconciles it
//! against marketplace listings, producing batched stock and price
//! updates for the Ozon and Yandex Market seller APIs.

pub mod batch;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod normalize;
pub mod reconcile;
pub mod stock_file;

pub use config::Config;
pub use error::{Result, SyncError};
pub use marketplace::{sync_marketplace, Marketplace, OzonApi, SyncReport, YandexApi};
pub use reconcile::{reconcile, PriceUpdate, StockUpdate};
pub use stock_file::{download_stock, load_stock_archive, StockRecord};
