//! Market Sync - supplier stock and price uploader
//!
//! Downloads the supplier stock archive and pushes current quantities
//! and prices to an Ozon store and two Yandex Market campaigns.

use std::path::PathBuf;

use clap::Parser;

use market_sync::stock_file::load_stock_archive;
use market_sync::{
    download_stock, sync_marketplace, Config, OzonApi, Result, StockRecord, SyncError, YandexApi,
};

/// Pushes supplier stock levels and prices to marketplace stores
#[derive(Parser, Debug)]
#[command(name = "market_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Skip the Ozon store
    #[arg(long, default_value_t = false)]
    skip_ozon: bool,

    /// Skip the Yandex Market campaigns
    #[arg(long, default_value_t = false)]
    skip_market: bool,

    /// Use an already-downloaded stock archive instead of fetching one
    #[arg(long)]
    stock_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenv::dotenv().ok();

    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args, &config).await {
        match &e {
            SyncError::Network(err) if err.is_timeout() => {
                log::error!("Request timed out: {}", err);
            }
            SyncError::Network(err) if err.is_connect() => {
                log::error!("Connection failed: {}", err);
            }
            other => log::error!("Sync aborted: {}", other),
        }
        std::process::exit(1);
    }

    log::info!("Sync completed successfully.");
}

/// One full synchronization run: stock file once, then every store in
/// sequence. The first failure aborts the remaining stores.
async fn run(args: &Args, config: &Config) -> Result<()> {
    let records = match &args.stock_file {
        Some(path) => load_stock_archive(path)?,
        None => download_stock().await?,
    };

    if args.skip_ozon {
        log::info!("Skipping Ozon store");
    } else {
        let ozon = OzonApi::new(config.ozon_client_id.clone(), config.ozon_api_key.clone());
        sync_store(&ozon, &records).await?;
    }

    if args.skip_market {
        log::info!("Skipping Yandex Market campaigns");
    } else {
        let campaigns = [
            (&config.campaign_fbs_id, &config.warehouse_fbs_id),
            (&config.campaign_dbs_id, &config.warehouse_dbs_id),
        ];
        for (campaign_id, warehouse_id) in campaigns {
            let market = YandexApi::new(
                campaign_id.clone(),
                config.market_token.clone(),
                warehouse_id.clone(),
            );
            sync_store(&market, &records).await?;
        }
    }

    Ok(())
}

async fn sync_store<M: market_sync::Marketplace>(
    api: &M,
    records: &[StockRecord],
) -> Result<()> {
    let report = sync_marketplace(api, records).await?;
    log::info!(
        "{}: done - {} offers, {} stock updates ({} in stock), {} price updates",
        api.name(),
        report.listed_offers,
        report.stocks_sent,
        report.in_stock,
        report.prices_sent
    );
    Ok(())
}
