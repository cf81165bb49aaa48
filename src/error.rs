//! Error types for price_tracker

use std::fmt;

/// Unified error type for catalog, storage, and API operations
#[derive(Debug)]
pub enum TrackerError {
    /// Malformed observation input (non-positive price, empty required string)
    Validation(String),
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse a JSON payload
    Parse(serde_json::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// Database operation failed
    Database(rusqlite::Error),
    /// File I/O error
    Io(std::io::Error),
    /// No product information available for a barcode
    ProductInfoNotFound(String),
    /// The matching delegate returned an unusable payload
    Delegate(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Validation(msg) => write!(f, "Validation error: {}", msg),
            TrackerError::Network(e) => write!(f, "Network error: {}", e),
            TrackerError::Parse(e) => write!(f, "Parse error: {}", e),
            TrackerError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            TrackerError::Database(e) => write!(f, "Database error: {}", e),
            TrackerError::Io(e) => write!(f, "I/O error: {}", e),
            TrackerError::ProductInfoNotFound(barcode) => {
                write!(f, "No product information for barcode: {}", barcode)
            }
            TrackerError::Delegate(msg) => write!(f, "Matching delegate error: {}", msg),
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::Network(e) => Some(e),
            TrackerError::Parse(e) => Some(e),
            TrackerError::Database(e) => Some(e),
            TrackerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        TrackerError::Network(err)
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Parse(err)
    }
}

impl From<rusqlite::Error> for TrackerError {
    fn from(err: rusqlite::Error) -> Self {
        TrackerError::Database(err)
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Io(err)
    }
}

/// Result alias for price_tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
