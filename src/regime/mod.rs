//! Market regime filter over the benchmark index.

pub mod detector;

pub use detector::{detect_regime, FLAT_RANGE_PCT, MIN_REGIME_CANDLES};
