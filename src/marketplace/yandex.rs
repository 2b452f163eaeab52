//! Yandex Market Partner API client.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::Marketplace;
use crate::error::{Result, SyncError};
use crate::reconcile::{PriceUpdate, StockUpdate};

const BASE_URL: &str = "https://api.partner.market.yandex.ru";

/// Page size for offer listing requests.
const PAGE_LIMIT: i64 = 200;

/// Client for one Yandex Market campaign, authenticated by OAuth token.
///
/// A store with several campaigns (FBS, DBS) uses one client per
/// campaign; each carries its own warehouse id.
pub struct YandexApi {
    client: reqwest::Client,
    base_url: String,
    campaign_id: String,
    token: String,
    warehouse_id: String,
    label: String,
}

impl YandexApi {
    pub fn new(campaign_id: String, token: String, warehouse_id: String) -> Self {
        Self::with_base_url(BASE_URL.to_string(), campaign_id, token, warehouse_id)
    }

    /// Client against a non-default endpoint (used by tests).
    pub(crate) fn with_base_url(
        base_url: String,
        campaign_id: String,
        token: String,
        warehouse_id: String,
    ) -> Self {
        log::debug!("Creating Yandex Market API client for campaign {}", campaign_id);
        let label = format!("market:{}", campaign_id);
        Self {
            client: reqwest::Client::new(),
            base_url,
            campaign_id,
            token,
            warehouse_id,
            label,
        }
    }

    fn campaign_url(&self, path: &str) -> String {
        format!("{}/campaigns/{}/{}", self.base_url, self.campaign_id, path)
    }

    async fn check(&self, response: reqwest::Response) -> Result<String> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Market request failed with {}: {}", status, error_text);
            return Err(SyncError::HttpStatus(status));
        }
        Ok(response.text().await?)
    }

    /// Fetches one page of the offer-mapping listing.
    async fn offer_page(&self, page_token: &str) -> Result<OfferMappingResult> {
        let url = self.campaign_url("offer-mapping-entries");
        log::debug!("GET {} (page_token='{}')", url, page_token);

        let limit = PAGE_LIMIT.to_string();
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .query(&[("page_token", page_token), ("limit", limit.as_str())])
            .send()
            .await?;

        let text = self.check(response).await?;
        let parsed: OfferMappingResponse = serde_json::from_str(&text)?;
        Ok(parsed.result)
    }
}

impl Marketplace for YandexApi {
    const STOCK_BATCH: usize = 2000;
    const PRICE_BATCH: usize = 500;

    fn name(&self) -> &str {
        &self.label
    }

    fn warehouse_id(&self) -> Option<&str> {
        Some(&self.warehouse_id)
    }

    async fn fetch_offer_ids(&self) -> Result<Vec<String>> {
        let mut offer_ids = Vec::new();
        let mut page_token = String::new();

        loop {
            let page = self.offer_page(&page_token).await?;
            offer_ids.extend(
                page.offer_mapping_entries
                    .into_iter()
                    .map(|entry| entry.offer.shop_sku),
            );

            // An absent or empty token is the end of the listing.
            match page.paging.next_page_token {
                Some(token) if !token.is_empty() => page_token = token,
                _ => break,
            }
        }

        Ok(offer_ids)
    }

    async fn submit_stocks(&self, batch: &[StockUpdate]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let request = StocksRequest {
            skus: batch
                .iter()
                .map(|update| SkuStock {
                    sku: &update.offer_id,
                    warehouse_id: update.warehouse_id.as_deref().unwrap_or(&self.warehouse_id),
                    items: vec![SkuStockItem {
                        count: update.quantity,
                        kind: "FIT",
                        updated_at: &updated_at,
                    }],
                })
                .collect(),
        };

        let url = self.campaign_url("offers/stocks");
        log::debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let text = self.check(response).await?;
        log::debug!("Stock update accepted: {}", text);
        Ok(())
    }

    async fn submit_prices(&self, batch: &[PriceUpdate]) -> Result<()> {
        let request = PricesRequest {
            offers: batch
                .iter()
                .map(|update| OfferPrice {
                    id: &update.offer_id,
                    price: MarketPrice {
                        value: update.price,
                        currency_id: "RUR",
                    },
                })
                .collect(),
        };

        let url = self.campaign_url("offer-prices/updates");
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let text = self.check(response).await?;
        log::debug!("Price update accepted: {}", text);
        Ok(())
    }
}

// Request/response structures for the Partner API

#[derive(Deserialize)]
struct OfferMappingResponse {
    result: OfferMappingResult,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct OfferMappingResult {
    #[serde(default)]
    offer_mapping_entries: Vec<OfferMappingEntry>,
    #[serde(default)]
    paging: Paging,
}

#[derive(Deserialize)]
struct OfferMappingEntry {
    offer: OfferRef,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferRef {
    shop_sku: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Paging {
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Serialize)]
struct StocksRequest<'a> {
    skus: Vec<SkuStock<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SkuStock<'a> {
    sku: &'a str,
    warehouse_id: &'a str,
    items: Vec<SkuStockItem<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SkuStockItem<'a> {
    count: i64,
    #[serde(rename = "type")]
    kind: &'static str,
    updated_at: &'a str,
}

#[derive(Serialize)]
struct PricesRequest<'a> {
    offers: Vec<OfferPrice<'a>>,
}

#[derive(Serialize)]
struct OfferPrice<'a> {
    id: &'a str,
    price: MarketPrice,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarketPrice {
    value: i64,
    currency_id: &'static str,
}

#[cfg(test)]
#[path = "yandex_tests.rs"]
mod tests;
