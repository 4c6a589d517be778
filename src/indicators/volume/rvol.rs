//! Relative volume: current volume against the trailing mean

use serde::{Deserialize, Serialize};

pub const DEFAULT_RVOL_PERIOD: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RelativeVolume {
    /// Fewer than `period` prior candles.
    Warmup,
    Ratio(f64),
}

impl RelativeVolume {
    /// Numeric reading; warm-up reads as a neutral 1.
    pub fn value(self) -> f64 {
        match self {
            RelativeVolume::Warmup => 1.0,
            RelativeVolume::Ratio(ratio) => ratio,
        }
    }

    pub fn is_warmup(self) -> bool {
        matches!(self, RelativeVolume::Warmup)
    }
}

/// Ratio of each volume to the mean of the `period` volumes before it.
/// A zero trailing mean divides by 1 instead.
pub fn calculate_rvol(volumes: &[f64], period: usize) -> Vec<RelativeVolume> {
    (0..volumes.len())
        .map(|i| {
            if period == 0 || i < period {
                return RelativeVolume::Warmup;
            }
            let avg = volumes[i - period..i].iter().sum::<f64>() / period as f64;
            let divisor = if avg == 0.0 { 1.0 } else { avg };
            RelativeVolume::Ratio(volumes[i] / divisor)
        })
        .collect()
}
