//! Small numeric helpers shared across indicators and the engine

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Largest value, or `None` for an empty slice
pub fn highest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Smallest value, or `None` for an empty slice
pub fn lowest(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}
