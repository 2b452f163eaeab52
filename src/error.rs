//! Error types for market_sync

use std::fmt;

/// Unified error type for sync operations
#[derive(Debug)]
pub enum SyncError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Remote API answered with an error status code
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse a JSON response
    Parse(serde_json::Error),
    /// Failed to read a row of the stock file
    Csv(csv::Error),
    /// Stock archive could not be opened
    Archive(zip::result::ZipError),
    /// File I/O error
    Io(std::io::Error),
    /// Quantity field in the stock file is not a number
    BadQuantity(String),
    /// Batch size must be positive
    BadChunkSize(usize),
    /// Required environment variable is not set
    MissingVar(&'static str),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Network(e) => write!(f, "Network error: {}", e),
            SyncError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            SyncError::Parse(e) => write!(f, "Parse error: {}", e),
            SyncError::Csv(e) => write!(f, "Stock file error: {}", e),
            SyncError::Archive(e) => write!(f, "Stock archive error: {}", e),
            SyncError::Io(e) => write!(f, "I/O error: {}", e),
            SyncError::BadQuantity(raw) => write!(f, "Unparseable quantity: '{}'", raw),
            SyncError::BadChunkSize(size) => write!(f, "Invalid batch size: {}", size),
            SyncError::MissingVar(name) => write!(f, "Environment variable {} is not set", name),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Network(e) => Some(e),
            SyncError::Parse(e) => Some(e),
            SyncError::Csv(e) => Some(e),
            SyncError::Archive(e) => Some(e),
            SyncError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Network(err)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Parse(err)
    }
}

impl From<csv::Error> for SyncError {
    fn from(err: csv::Error) -> Self {
        SyncError::Csv(err)
    }
}

impl From<zip::result::ZipError> for SyncError {
    fn from(err: zip::result::ZipError) -> Self {
        SyncError::Archive(err)
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err)
    }
}

/// Result alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
