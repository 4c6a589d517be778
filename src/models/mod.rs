//! Shared data models spanning the engine layers.

pub mod candle;
pub mod market;
pub mod scan;
pub mod signal;

pub use candle::{Candle, CandleSeries};
pub use market::{MarketRegime, RegimeStatus, Trend};
pub use scan::{ScanResult, ScanStatus};
pub use signal::{SignalKind, SignalMetrics, TradeSignal};
