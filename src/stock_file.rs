//! Supplier stock file download and parsing.
//!
//! The supplier publishes a zip archive containing one spreadsheet export.
//! The first rows are a banner; the real table starts with the column
//! headers `Код` / `Количество` / `Цена`.

use std::io::{Cursor, Read};

use serde::Deserialize;

use crate::error::{Result, SyncError};

/// Fixed location of the supplier stock archive.
const STOCK_ARCHIVE_URL: &str = "https://timeworld.ru/upload/files/ostatki.zip";

/// Banner rows before the header line in the export.
const PREAMBLE_ROWS: usize = 17;

/// One row of the supplier stock table. All fields are kept raw; see
/// [`crate::normalize`] for the conversion rules.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StockRecord {
    /// Product code, matching the marketplace offer id.
    #[serde(rename = "Код")]
    pub code: String,
    /// Reported quantity, e.g. `"5"` or `">10"`.
    #[serde(rename = "Количество")]
    pub quantity: String,
    /// Display price, e.g. `"5'990.00 руб."`.
    #[serde(rename = "Цена")]
    pub price: String,
}

/// Downloads the supplier archive and returns the stock records inside.
pub async fn download_stock() -> Result<Vec<StockRecord>> {
    download_stock_from(STOCK_ARCHIVE_URL).await
}

/// Downloads from the given URL (used by tests with mock servers).
pub(crate) async fn download_stock_from(url: &str) -> Result<Vec<StockRecord>> {
    log::info!("Downloading stock archive from {}", url);

    let response = reqwest::Client::new().get(url).send().await?;
    if !response.status().is_success() {
        return Err(SyncError::HttpStatus(response.status()));
    }

    let bytes = response.bytes().await?;
    let records = parse_archive(&bytes)?;
    log::info!("Loaded {} stock records", records.len());
    Ok(records)
}

/// Reads an already-downloaded archive from disk, for offline runs.
pub fn load_stock_archive<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<StockRecord>> {
    log::info!("Reading stock archive from {}", path.as_ref().display());
    let bytes = std::fs::read(path)?;
    let records = parse_archive(&bytes)?;
    log::info!("Loaded {} stock records", records.len());
    Ok(records)
}

/// Extracts the spreadsheet from the archive bytes and parses it.
fn parse_archive(bytes: &[u8]) -> Result<Vec<StockRecord>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    // The supplier ships exactly one file per archive.
    let mut file = archive.by_index(0)?;
    log::debug!("Extracting {} from archive", file.name());

    let mut text = String::new();
    file.read_to_string(&mut text)?;
    parse_records(&text)
}

/// Parses the extracted table, skipping the banner preamble.
pub(crate) fn parse_records(text: &str) -> Result<Vec<StockRecord>> {
    let table = skip_preamble(text, PREAMBLE_ROWS);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(table.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: StockRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Returns the text with its first `rows` lines removed.
fn skip_preamble(text: &str, rows: usize) -> String {
    text.lines().skip(rows).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
#[path = "stock_file_tests.rs"]
mod tests;
