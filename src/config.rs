//! Runtime configuration from the environment.

use crate::error::{Result, SyncError};

/// Credentials and store identifiers, all read from the environment.
/// Values are opaque strings passed through to the APIs unvalidated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ozon `Client-Id` header value.
    pub ozon_client_id: String,
    /// Ozon `Api-Key` header value.
    pub ozon_api_key: String,
    /// Yandex Market OAuth bearer token.
    pub market_token: String,
    /// Yandex FBS campaign id.
    pub campaign_fbs_id: String,
    /// Yandex DBS campaign id.
    pub campaign_dbs_id: String,
    /// Warehouse for the FBS campaign.
    pub warehouse_fbs_id: String,
    /// Warehouse for the DBS campaign.
    pub warehouse_dbs_id: String,
}

impl Config {
    /// Reads every required variable; the first missing one is an error.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ozon_client_id: var("CLIENT_ID")?,
            ozon_api_key: var("SELLER_TOKEN")?,
            market_token: var("MARKET_TOKEN")?,
            campaign_fbs_id: var("FBS_ID")?,
            campaign_dbs_id: var("DBS_ID")?,
            warehouse_fbs_id: var("WAREHOUSE_FBS_ID")?,
            warehouse_dbs_id: var("WAREHOUSE_DBS_ID")?,
        })
    }
}

fn var(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| SyncError::MissingVar(name))
}
