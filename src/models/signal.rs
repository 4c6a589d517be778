//! Per-symbol trade decision emitted by the signal engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    Buy,
    Sell,
    NoTrade,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
            SignalKind::NoTrade => "NO_TRADE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMetrics {
    pub rvol: String,
    pub atr_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSignal {
    pub symbol: String,
    pub mode: Mode,
    pub signal: SignalKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_reward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    /// Time of the candle the signal was taken on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<SignalMetrics>,
}

impl TradeSignal {
    pub fn no_trade(symbol: impl Into<String>, mode: Mode, reason: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            mode,
            signal: SignalKind::NoTrade,
            reason: Some(reason.into()),
            entry: None,
            stop_loss: None,
            target: None,
            current_price: None,
            risk_reward: None,
            confidence: None,
            timestamp: None,
            metrics: None,
        }
    }

    pub fn is_trade(&self) -> bool {
        self.signal != SignalKind::NoTrade
    }
}
