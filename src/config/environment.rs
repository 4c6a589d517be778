//! Deployment settings read from the process environment

use std::env;
use std::time::Duration;

use crate::core::scanner::ScanPlan;

/// Default universe: a representative slice of NIFTY 50 large caps.
pub const DEFAULT_SYMBOLS: &[&str] = &[
    "RELIANCE.NS",
    "TCS.NS",
    "INFY.NS",
    "HDFCBANK.NS",
    "ICICIBANK.NS",
    "SBIN.NS",
    "BHARTIARTL.NS",
    "ITC.NS",
    "KOTAKBANK.NS",
    "LICI.NS",
    "LT.NS",
    "HINDUNILVR.NS",
    "AXISBANK.NS",
    "TATAMOTORS.NS",
    "MARUTI.NS",
    "ULTRACEMCO.NS",
    "ASIANPAINT.NS",
    "SUNPHARMA.NS",
    "TITAN.NS",
    "BAJFINANCE.NS",
];

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct ScannerSettings {
    pub port: u16,
    pub symbols: Vec<String>,
    pub benchmark_symbol: String,
    pub benchmark_label: String,
    pub benchmark_interval: String,
    pub range: String,
    pub scalp_interval: String,
    pub intraday_interval: String,
    pub scan_timeout: Duration,
    pub yahoo_base_url: String,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            benchmark_symbol: "^NSEI".to_string(),
            benchmark_label: "NIFTY 50".to_string(),
            benchmark_interval: "15m".to_string(),
            range: "1d".to_string(),
            scalp_interval: "5m".to_string(),
            intraday_interval: "15m".to_string(),
            scan_timeout: Duration::from_secs(30),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
        }
    }
}

impl ScannerSettings {
    /// Overlay any set environment variables on the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let symbols = env::var("SYMBOLS")
            .ok()
            .map(|s| parse_symbols(&s))
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.symbols);

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            symbols,
            benchmark_symbol: env_or("BENCHMARK_SYMBOL", defaults.benchmark_symbol),
            benchmark_label: env_or("BENCHMARK_LABEL", defaults.benchmark_label),
            benchmark_interval: env_or("BENCHMARK_INTERVAL", defaults.benchmark_interval),
            range: env_or("SCAN_RANGE", defaults.range),
            scalp_interval: env_or("SCALP_INTERVAL", defaults.scalp_interval),
            intraday_interval: env_or("INTRADAY_INTERVAL", defaults.intraday_interval),
            scan_timeout: env::var("SCAN_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.scan_timeout),
            yahoo_base_url: env_or("YAHOO_BASE_URL", defaults.yahoo_base_url),
        }
    }

    pub fn scan_plan(&self) -> ScanPlan {
        ScanPlan {
            symbols: self.symbols.clone(),
            benchmark_symbol: self.benchmark_symbol.clone(),
            benchmark_label: self.benchmark_label.clone(),
            benchmark_interval: self.benchmark_interval.clone(),
            range: self.range.clone(),
            scalp_interval: self.scalp_interval.clone(),
            intraday_interval: self.intraday_interval.clone(),
            timeout: self.scan_timeout,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
