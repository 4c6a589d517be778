//! Mode-dependent filter thresholds

use crate::config::{Mode, StrategyConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeThresholds {
    pub min_rvol: f64,
    pub min_atr_pct: f64,
    pub stop_multiplier: f64,
    pub risk_reward: f64,
}

impl ModeThresholds {
    pub const SCALP_MIN_ATR_PCT: f64 = 0.35;
    pub const SCALP_STOP_MULTIPLIER: f64 = 0.6;
    pub const SCALP_RISK_REWARD: f64 = 1.0;

    pub const INTRADAY_MIN_ATR_PCT: f64 = 0.6;
    pub const INTRADAY_STOP_MULTIPLIER: f64 = 1.0;
    pub const INTRADAY_RISK_REWARD: f64 = 1.5;

    pub fn for_mode(config: &StrategyConfig) -> Self {
        match config.mode {
            Mode::Scalp => Self {
                min_rvol: config.vol_multiplier_scalp,
                min_atr_pct: Self::SCALP_MIN_ATR_PCT,
                stop_multiplier: Self::SCALP_STOP_MULTIPLIER,
                risk_reward: Self::SCALP_RISK_REWARD,
            },
            Mode::Intraday => Self {
                min_rvol: config.vol_multiplier_intraday,
                min_atr_pct: Self::INTRADAY_MIN_ATR_PCT,
                stop_multiplier: Self::INTRADAY_STOP_MULTIPLIER,
                risk_reward: Self::INTRADAY_RISK_REWARD,
            },
        }
    }

    /// Rendered as `1:<ratio>`, e.g. `1:1.5`
    pub fn risk_reward_label(&self) -> String {
        format!("1:{}", self.risk_reward)
    }
}
