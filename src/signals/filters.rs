//! Pipeline stages. Each returns the verdict that stops evaluation, if any.

use crate::common::math::{highest, lowest};
use crate::models::candle::Candle;
use crate::signals::decision::TradeDirection;
use crate::signals::engine::IndicatorSnapshot;
use crate::signals::reason::NoTradeReason;
use crate::signals::thresholds::ModeThresholds;

/// Candles before the signal candle used for the sideways range
pub const SIDEWAYS_LOOKBACK: usize = 20;
/// The lookback range must reach this multiple of ATR
pub const SIDEWAYS_ATR_FACTOR: f64 = 1.2;
/// Minimum |close - open| / (high - low) when close confirmation is on
pub const MIN_BODY_RATIO: f64 = 0.6;

pub fn check_volume(rvol: f64, thresholds: &ModeThresholds) -> Result<(), NoTradeReason> {
    if rvol < thresholds.min_rvol {
        return Err(NoTradeReason::LowVolume { rvol });
    }
    Ok(())
}

pub fn check_volatility(atr_pct: f64, thresholds: &ModeThresholds) -> Result<(), NoTradeReason> {
    if atr_pct < thresholds.min_atr_pct {
        return Err(NoTradeReason::LowVolatility { atr_pct });
    }
    Ok(())
}

/// Range over `[last_idx - 20, last_idx)`, excluding the signal candle
pub fn check_sideways(candles: &[Candle], last_idx: usize, atr: f64) -> Result<(), NoTradeReason> {
    if last_idx < SIDEWAYS_LOOKBACK || last_idx >= candles.len() {
        return Err(NoTradeReason::InsufficientData);
    }

    let window = &candles[last_idx - SIDEWAYS_LOOKBACK..last_idx];
    let highs: Vec<f64> = window.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = window.iter().map(|c| c.low).collect();
    let (Some(high), Some(low)) = (highest(&highs), lowest(&lows)) else {
        return Err(NoTradeReason::InsufficientData);
    };

    if high - low < SIDEWAYS_ATR_FACTOR * atr {
        return Err(NoTradeReason::Sideways);
    }
    Ok(())
}

/// Short > mid > long EMA with price above VWAP
pub fn is_buy_trend(snapshot: &IndicatorSnapshot) -> bool {
    let Some(vwap) = snapshot.vwap else {
        return false;
    };
    snapshot.ema_short > snapshot.ema_mid
        && snapshot.ema_mid > snapshot.ema_long
        && snapshot.price > vwap
}

/// Short < mid < long EMA with price below VWAP
pub fn is_sell_trend(snapshot: &IndicatorSnapshot) -> bool {
    let Some(vwap) = snapshot.vwap else {
        return false;
    };
    snapshot.ema_short < snapshot.ema_mid
        && snapshot.ema_mid < snapshot.ema_long
        && snapshot.price < vwap
}

pub fn classify_trend(snapshot: &IndicatorSnapshot) -> Result<TradeDirection, NoTradeReason> {
    if is_buy_trend(snapshot) {
        Ok(TradeDirection::Buy)
    } else if is_sell_trend(snapshot) {
        Ok(TradeDirection::Sell)
    } else {
        Err(NoTradeReason::NoTrend)
    }
}

/// Body-to-range ratio; a zero-range candle has no body worth confirming.
pub fn body_ratio(candle: &Candle) -> Option<f64> {
    let range = candle.range();
    if range > 0.0 {
        Some(candle.body() / range)
    } else {
        None
    }
}

pub fn confirm_entry(
    current: &Candle,
    previous: &Candle,
    confirm_close: bool,
) -> Result<(), NoTradeReason> {
    if confirm_close {
        match body_ratio(current) {
            Some(ratio) if ratio >= MIN_BODY_RATIO => {}
            _ => return Err(NoTradeReason::WeakCandleBody),
        }
    }

    if current.volume <= previous.volume {
        return Err(NoTradeReason::VolumeDecreasing);
    }
    Ok(())
}
