//! Range-bound day detection on the benchmark index

use tracing::debug;

use crate::common::math::{highest, lowest, round2};
use crate::models::candle::CandleSeries;
use crate::models::market::{MarketRegime, Trend};

/// A day whose high-low range is below this percent of the open is flat.
pub const FLAT_RANGE_PCT: f64 = 0.4;

pub const MIN_REGIME_CANDLES: usize = 2;

/// Classify the benchmark day. A missing or too-short series yields the
/// permissive [`MarketRegime::unavailable`] default.
pub fn detect_regime(series: Option<&CandleSeries>) -> MarketRegime {
    let Some(series) = series.filter(|s| s.len() >= MIN_REGIME_CANDLES) else {
        debug!("Benchmark data unavailable or too short, assuming active market");
        return MarketRegime::unavailable();
    };

    if series.has_invalid_values() {
        debug!(symbol = %series.symbol, "Benchmark series has invalid values, assuming active market");
        return MarketRegime::unavailable();
    }

    let candles = &series.candles;
    let day_open = candles[0].open;
    let last_close = candles[candles.len() - 1].close;
    let (Some(day_high), Some(day_low)) = (highest(&series.highs()), lowest(&series.lows())) else {
        return MarketRegime::unavailable();
    };

    if day_open <= 0.0 {
        return MarketRegime::unavailable();
    }

    let range_pct = (day_high - day_low) / day_open * 100.0;
    let is_flat = range_pct < FLAT_RANGE_PCT;
    let trend = if last_close > day_open {
        Trend::Up
    } else {
        Trend::Down
    };

    debug!(
        symbol = %series.symbol,
        range_pct = range_pct,
        is_flat = is_flat,
        trend = ?trend,
        "Benchmark regime classified"
    );

    MarketRegime {
        is_flat,
        range_pct: Some(round2(range_pct)),
        trend: Some(trend),
        current_price: Some(last_close),
        status: None,
    }
}
