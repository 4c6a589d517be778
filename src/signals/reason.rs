//! Reasons a symbol ends the pipeline without a trade

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoTradeReason {
    InsufficientData,
    InvalidData,
    LowVolume { rvol: f64 },
    LowVolatility { atr_pct: f64 },
    Sideways,
    NoTrend,
    WeakCandleBody,
    VolumeDecreasing,
}

impl fmt::Display for NoTradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoTradeReason::InsufficientData => write!(f, "Insufficient Data"),
            NoTradeReason::InvalidData => write!(f, "Invalid Data"),
            NoTradeReason::LowVolume { rvol } => write!(f, "Low Volume (RVol: {:.2})", rvol),
            NoTradeReason::LowVolatility { atr_pct } => {
                write!(f, "Low Volatility (ATR%: {:.2}%)", atr_pct)
            }
            NoTradeReason::Sideways => write!(f, "Sideways Stock"),
            NoTradeReason::NoTrend => write!(f, "No Trend"),
            NoTradeReason::WeakCandleBody => write!(f, "Weak Candle Body"),
            NoTradeReason::VolumeDecreasing => write!(f, "Volume decreasing"),
        }
    }
}
