//! Error types for the fallible seams around the signal pipeline.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan did not complete within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("no chart data for {symbol}: {reason}")]
    NoData { symbol: String, reason: String },
}

impl FetchError {
    /// Whether another attempt might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::NoData { .. } => false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least 1, got {value}")]
    InvalidPeriod { field: &'static str, value: u32 },

    #[error("{field} must be a positive number, got {value}")]
    InvalidMultiplier { field: &'static str, value: f64 },
}
