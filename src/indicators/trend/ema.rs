//! EMA (Exponential Moving Average) indicator

/// Calculate the EMA series for `values`, one output per input.
///
/// `k = 2 / (period + 1)`. The first output is seeded with `values[0]` rather
/// than an SMA warm-up, so the earliest values lag a textbook EMA and should
/// not be read as converged.
pub fn calculate_ema(values: &[f64], period: u32) -> Vec<f64> {
    let Some(&seed) = values.first() else {
        return Vec::new();
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = Vec::with_capacity(values.len());
    ema.push(seed);

    for &value in &values[1..] {
        let prev = ema[ema.len() - 1];
        ema.push(value * k + prev * (1.0 - k));
    }

    ema
}

/// Calculate several EMAs over the same input, in `periods` order
pub fn calculate_emas(values: &[f64], periods: &[u32]) -> Vec<Vec<f64>> {
    periods
        .iter()
        .map(|&period| calculate_ema(values, period))
        .collect()
}
