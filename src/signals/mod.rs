//! Rule-based signal generation.

pub mod decision;
pub mod engine;
pub mod filters;
pub mod reason;
pub mod thresholds;

pub use decision::{TradeDirection, TradeSetup};
pub use engine::{Evaluation, IndicatorSnapshot, SignalEngine, MIN_CANDLES};
pub use reason::NoTradeReason;
pub use thresholds::ModeThresholds;
