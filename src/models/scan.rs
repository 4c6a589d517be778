//! Aggregated result of one scan invocation

use serde::{Deserialize, Serialize};

use crate::models::market::MarketRegime;
use crate::models::signal::TradeSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    Active,
    MarketFlat,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Active => "ACTIVE",
            ScanStatus::MarketFlat => "MARKET_FLAT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub nifty_data: MarketRegime,
    pub trades: Vec<TradeSignal>,
}

impl ScanResult {
    pub fn market_flat(regime: MarketRegime, message: String) -> Self {
        Self {
            status: ScanStatus::MarketFlat,
            message: Some(message),
            nifty_data: regime,
            trades: Vec::new(),
        }
    }

    pub fn active(regime: MarketRegime, trades: Vec<TradeSignal>) -> Self {
        Self {
            status: ScanStatus::Active,
            message: None,
            nifty_data: regime,
            trades,
        }
    }
}
