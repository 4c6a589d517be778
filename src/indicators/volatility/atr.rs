//! ATR (Average True Range) indicator

/// True range of a bar given the previous close
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Calculate Wilder-smoothed ATR, index-aligned with the input.
///
/// The first `period - 1` positions are `None`. Position `period - 1` holds
/// the simple mean of the first `period` true ranges; from there on
/// `atr[i] = (atr[i-1] * (period - 1) + tr[i]) / period`.
/// Mismatched slice lengths are truncated to the shortest.
pub fn calculate_atr(high: &[f64], low: &[f64], close: &[f64], period: u32) -> Vec<Option<f64>> {
    let len = high.len().min(low.len()).min(close.len());
    let period = period as usize;
    let mut atr = vec![None; len];

    if period == 0 || len < period {
        return atr;
    }

    let tr: Vec<f64> = (0..len)
        .map(|i| {
            if i == 0 {
                high[0] - low[0]
            } else {
                true_range(high[i], low[i], close[i - 1])
            }
        })
        .collect();

    let n = period as f64;
    let mut current = tr[..period].iter().sum::<f64>() / n;
    atr[period - 1] = Some(current);

    for i in period..len {
        current = (current * (n - 1.0) + tr[i]) / n;
        atr[i] = Some(current);
    }

    atr
}
