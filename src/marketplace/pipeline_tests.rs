//! Tests for the shared sync pipeline, using an in-memory marketplace.

use std::sync::Mutex;

use super::*;
use crate::error::SyncError;
use crate::stock_file::StockRecord;

/// What a fake marketplace received, in call order.
#[derive(Debug, PartialEq, Eq)]
enum Call {
    Stocks(Vec<(String, i64)>),
    Prices(Vec<(String, i64)>),
}

/// In-memory marketplace with tiny batch limits.
struct TestMarket {
    offer_ids: Vec<String>,
    calls: Mutex<Vec<Call>>,
    /// Fail the nth stock submission (0-based), if set.
    fail_stock_call: Option<usize>,
}

impl TestMarket {
    fn listing(offer_ids: &[&str]) -> Self {
        Self {
            offer_ids: offer_ids.iter().map(|id| id.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
            fail_stock_call: None,
        }
    }

    fn stock_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, Call::Stocks(_)))
            .count()
    }
}

impl Marketplace for TestMarket {
    const STOCK_BATCH: usize = 2;
    const PRICE_BATCH: usize = 2;

    fn name(&self) -> &str {
        "test"
    }

    async fn fetch_offer_ids(&self) -> Result<Vec<String>> {
        Ok(self.offer_ids.clone())
    }

    async fn submit_stocks(&self, batch: &[StockUpdate]) -> Result<()> {
        if self.fail_stock_call == Some(self.stock_calls()) {
            return Err(SyncError::HttpStatus(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
        self.calls.lock().unwrap().push(Call::Stocks(
            batch
                .iter()
                .map(|update| (update.offer_id.clone(), update.quantity))
                .collect(),
        ));
        Ok(())
    }

    async fn submit_prices(&self, batch: &[PriceUpdate]) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Prices(
            batch
                .iter()
                .map(|update| (update.offer_id.clone(), update.price))
                .collect(),
        ));
        Ok(())
    }
}

fn record(code: &str, quantity: &str, price: &str) -> StockRecord {
    StockRecord {
        code: code.to_string(),
        quantity: quantity.to_string(),
        price: price.to_string(),
    }
}

#[tokio::test]
async fn batches_are_submitted_in_order_at_the_platform_limit() {
    let market = TestMarket::listing(&["A", "B", "C", "D", "E"]);
    let records = vec![
        record("A", "5", "100.00"),
        record("B", "3", "200.00"),
        record("C", ">10", "300.00"),
    ];

    let report = sync_marketplace(&market, &records).await.unwrap();

    let calls = market.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            // 5 stock updates split 2/2/1, stocks before prices.
            Call::Stocks(vec![("A".to_string(), 5), ("B".to_string(), 3)]),
            Call::Stocks(vec![("C".to_string(), 100), ("D".to_string(), 0)]),
            Call::Stocks(vec![("E".to_string(), 0)]),
            Call::Prices(vec![("A".to_string(), 100), ("B".to_string(), 200)]),
            Call::Prices(vec![("C".to_string(), 300)]),
        ]
    );

    assert_eq!(
        report,
        SyncReport {
            listed_offers: 5,
            stocks_sent: 5,
            in_stock: 3,
            prices_sent: 3,
        }
    );
}

#[tokio::test]
async fn failed_batch_aborts_the_remaining_chunks() {
    let mut market = TestMarket::listing(&["A", "B", "C", "D", "E"]);
    market.fail_stock_call = Some(1);
    let records = vec![record("A", "5", "100.00")];

    let result = sync_marketplace(&market, &records).await;
    assert!(matches!(result, Err(SyncError::HttpStatus(_))));

    // The first chunk stays applied; nothing after the failure runs.
    let calls = market.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Stocks(_)));
}

#[tokio::test]
async fn empty_listing_submits_nothing() {
    let market = TestMarket::listing(&[]);
    let records = vec![record("A", "5", "100.00")];

    let report = sync_marketplace(&market, &records).await.unwrap();

    assert!(market.calls.lock().unwrap().is_empty());
    assert_eq!(report, SyncReport::default());
}

#[tokio::test]
async fn warehouse_scope_reaches_every_stock_update() {
    struct WarehouseMarket(TestMarket);

    impl Marketplace for WarehouseMarket {
        const STOCK_BATCH: usize = 10;
        const PRICE_BATCH: usize = 10;

        fn name(&self) -> &str {
            "warehouse-test"
        }

        fn warehouse_id(&self) -> Option<&str> {
            Some("WH-9")
        }

        async fn fetch_offer_ids(&self) -> Result<Vec<String>> {
            Ok(self.0.offer_ids.clone())
        }

        async fn submit_stocks(&self, batch: &[StockUpdate]) -> Result<()> {
            assert!(batch
                .iter()
                .all(|update| update.warehouse_id.as_deref() == Some("WH-9")));
            self.0.submit_stocks(batch).await
        }

        async fn submit_prices(&self, batch: &[PriceUpdate]) -> Result<()> {
            self.0.submit_prices(batch).await
        }
    }

    let market = WarehouseMarket(TestMarket::listing(&["A", "B"]));
    let records = vec![record("A", "2", "50.00")];

    let report = sync_marketplace(&market, &records).await.unwrap();
    assert_eq!(report.stocks_sent, 2);
    assert_eq!(market.0.stock_calls(), 1);
}
