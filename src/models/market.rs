//! Benchmark market regime

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeStatus {
    DataUnavailable,
}

/// Day classification of the benchmark index, derived fresh on every scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRegime {
    pub is_flat: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RegimeStatus>,
}

impl MarketRegime {
    /// Permissive default used when the benchmark cannot be classified.
    /// Never flat, so it never blocks a scan.
    pub fn unavailable() -> Self {
        Self {
            is_flat: false,
            range_pct: Some(1.0),
            trend: None,
            current_price: None,
            status: Some(RegimeStatus::DataUnavailable),
        }
    }

    /// Regime reported when the market filter is switched off.
    pub fn unchecked() -> Self {
        Self {
            is_flat: false,
            range_pct: None,
            trend: None,
            current_price: None,
            status: None,
        }
    }

    /// MARKET_FLAT message for a benchmark below `threshold_pct`
    pub fn flat_message(benchmark_label: &str, threshold_pct: f64) -> String {
        format!(
            "{} Range < {}%. Market is sideways.",
            benchmark_label, threshold_pct
        )
    }
}
