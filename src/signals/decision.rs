//! Entry, stop-loss and target for a confirmed trend

use serde::{Deserialize, Serialize};

use crate::models::candle::Candle;
use crate::models::signal::SignalKind;
use crate::signals::thresholds::ModeThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl From<TradeDirection> for SignalKind {
    fn from(direction: TradeDirection) -> Self {
        match direction {
            TradeDirection::Buy => SignalKind::Buy,
            TradeDirection::Sell => SignalKind::Sell,
        }
    }
}

/// Breakout setup on the signal candle. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeSetup {
    pub direction: TradeDirection,
    pub entry: f64,
    pub structural_stop: f64,
    pub atr_stop: f64,
    pub stop_loss: f64,
    pub target: f64,
}

impl TradeSetup {
    /// Entry breaks the candle's high (buy) or low (sell). The stop is the
    /// tighter of the candle's opposite extreme and an ATR stop from entry.
    pub fn compute(
        direction: TradeDirection,
        candle: &Candle,
        atr: f64,
        thresholds: &ModeThresholds,
    ) -> Self {
        let atr_offset = atr * thresholds.stop_multiplier;

        let (entry, structural_stop, atr_stop, stop_loss) = match direction {
            TradeDirection::Buy => {
                let entry = candle.high;
                let atr_stop = entry - atr_offset;
                (entry, candle.low, atr_stop, candle.low.max(atr_stop))
            }
            TradeDirection::Sell => {
                let entry = candle.low;
                let atr_stop = entry + atr_offset;
                (entry, candle.high, atr_stop, candle.high.min(atr_stop))
            }
        };

        let risk = (entry - stop_loss).abs();
        let target = match direction {
            TradeDirection::Buy => entry + risk * thresholds.risk_reward,
            TradeDirection::Sell => entry - risk * thresholds.risk_reward,
        };

        Self {
            direction,
            entry,
            structural_stop,
            atr_stop,
            stop_loss,
            target,
        }
    }

    pub fn risk(&self) -> f64 {
        (self.entry - self.stop_loss).abs()
    }

    pub fn is_finite(&self) -> bool {
        [self.entry, self.stop_loss, self.target]
            .iter()
            .all(|v| v.is_finite())
    }
}
