//! Ozon Seller API client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Marketplace;
use crate::error::{Result, SyncError};
use crate::reconcile::{PriceUpdate, StockUpdate};

const BASE_URL: &str = "https://api-seller.ozon.ru";

/// Page size for product listing requests.
const PAGE_LIMIT: i64 = 1000;

/// Client for one Ozon store, authenticated by client id and api key.
pub struct OzonApi {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    api_key: String,
}

impl OzonApi {
    pub fn new(client_id: String, api_key: String) -> Self {
        Self::with_base_url(BASE_URL.to_string(), client_id, api_key)
    }

    /// Client against a non-default endpoint (used by tests).
    pub(crate) fn with_base_url(base_url: String, client_id: String, api_key: String) -> Self {
        log::debug!("Creating Ozon API client for client id {}", client_id);
        Self {
            client: reqwest::Client::new(),
            base_url,
            client_id,
            api_key,
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Client-Id", &self.client_id)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Ozon request to {} failed with {}: {}", url, status, error_text);
            return Err(SyncError::HttpStatus(status));
        }

        let text = response.text().await?;
        log::debug!("Ozon response: {}", text);
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetches one page of the product list.
    async fn product_page(&self, last_id: &str) -> Result<ProductListResult> {
        let request = ProductListRequest {
            filter: ProductFilter { visibility: "ALL" },
            last_id: last_id.to_string(),
            limit: PAGE_LIMIT,
        };
        let response: ProductListResponse = self.post("/v2/product/list", &request).await?;
        Ok(response.result)
    }
}

impl Marketplace for OzonApi {
    const STOCK_BATCH: usize = 100;
    const PRICE_BATCH: usize = 1000;

    fn name(&self) -> &str {
        "ozon"
    }

    async fn fetch_offer_ids(&self) -> Result<Vec<String>> {
        let mut offer_ids = Vec::new();
        let mut last_id = String::new();

        loop {
            let page = self.product_page(&last_id).await?;
            let received = page.items.len();
            last_id = page.last_id;
            offer_ids.extend(page.items.into_iter().map(|item| item.offer_id));

            // Termination is driven by the reported total; an empty page
            // short of the total would otherwise repeat forever.
            if received == 0 || offer_ids.len() as i64 >= page.total {
                break;
            }
        }

        Ok(offer_ids)
    }

    async fn submit_stocks(&self, batch: &[StockUpdate]) -> Result<()> {
        let request = StocksRequest {
            stocks: batch
                .iter()
                .map(|update| StockItem {
                    offer_id: &update.offer_id,
                    stock: update.quantity,
                })
                .collect(),
        };
        let response: serde_json::Value = self.post("/v1/product/import/stocks", &request).await?;
        log::debug!("Stock import accepted: {}", response);
        Ok(())
    }

    async fn submit_prices(&self, batch: &[PriceUpdate]) -> Result<()> {
        let request = PricesRequest {
            prices: batch
                .iter()
                .map(|update| PriceItem {
                    auto_action_enabled: "UNKNOWN",
                    currency_code: "RUB",
                    offer_id: &update.offer_id,
                    old_price: "0",
                    price: update.price.to_string(),
                })
                .collect(),
        };
        let response: serde_json::Value = self.post("/v1/product/import/prices", &request).await?;
        log::debug!("Price import accepted: {}", response);
        Ok(())
    }
}

// Request/response structures for the Seller API

#[derive(Serialize)]
struct ProductListRequest {
    filter: ProductFilter,
    last_id: String,
    limit: i64,
}

#[derive(Serialize)]
struct ProductFilter {
    visibility: &'static str,
}

#[derive(Deserialize)]
struct ProductListResponse {
    result: ProductListResult,
}

#[derive(Deserialize)]
struct ProductListResult {
    #[serde(default)]
    items: Vec<ProductListItem>,
    #[serde(default)]
    total: i64,
    #[serde(default)]
    last_id: String,
}

#[derive(Deserialize)]
struct ProductListItem {
    offer_id: String,
}

#[derive(Serialize)]
struct StocksRequest<'a> {
    stocks: Vec<StockItem<'a>>,
}

#[derive(Serialize)]
struct StockItem<'a> {
    offer_id: &'a str,
    stock: i64,
}

#[derive(Serialize)]
struct PricesRequest<'a> {
    prices: Vec<PriceItem<'a>>,
}

#[derive(Serialize)]
struct PriceItem<'a> {
    auto_action_enabled: &'static str,
    currency_code: &'static str,
    offer_id: &'a str,
    old_price: &'static str,
    price: String,
}

#[cfg(test)]
#[path = "ozon_tests.rs"]
mod tests;
