//! VWAP (Volume Weighted Average Price)

use crate::models::candle::Candle;

/// Cumulative VWAP from the first candle of the series (no session reset).
///
/// Positions where no volume has traded yet are `None`.
pub fn calculate_vwap(candles: &[Candle]) -> Vec<Option<f64>> {
    let mut cumulative_tpv = 0.0;
    let mut cumulative_volume = 0.0;

    candles
        .iter()
        .map(|c| {
            cumulative_tpv += c.typical_price() * c.volume;
            cumulative_volume += c.volume;
            if cumulative_volume > 0.0 {
                Some(cumulative_tpv / cumulative_volume)
            } else {
                None
            }
        })
        .collect()
}
