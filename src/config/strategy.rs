//! Scan configuration snapshot
//!
//! The engine only ever reads a `StrategyConfig`; changes go through a
//! [`ConfigStore`](super::ConfigStore) which hands out fresh copies.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Scalp,
    Intraday,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Scalp => "SCALP",
            Mode::Intraday => "INTRADAY",
        }
    }
}

/// Safety switches. A flag absent from an incoming payload reads as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyConfig {
    #[serde(default)]
    pub market_filter: bool,
    #[serde(default)]
    pub confirm_close: bool,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            market_filter: true,
            confirm_close: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub mode: Mode,
    /// Percent of capital per trade. Carried for clients, not used by the engine.
    pub risk_per_trade: f64,
    /// Carried for clients, not used by the engine.
    pub max_trades: u32,
    pub ema_short: u32,
    pub ema_mid: u32,
    pub ema_long: u32,
    pub atr_period: u32,
    pub atr_multiplier: f64,
    pub vol_multiplier_scalp: f64,
    pub vol_multiplier_intraday: f64,
    pub safety: SafetyConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Intraday,
            risk_per_trade: 1.0,
            max_trades: 5,
            ema_short: 9,
            ema_mid: 21,
            ema_long: 50,
            atr_period: 14,
            atr_multiplier: 1.5,
            vol_multiplier_scalp: 1.8,
            vol_multiplier_intraday: 1.4,
            safety: SafetyConfig::default(),
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("emaShort", self.ema_short),
            ("emaMid", self.ema_mid),
            ("emaLong", self.ema_long),
            ("atrPeriod", self.atr_period),
        ];
        for (field, value) in periods {
            if value < 1 {
                return Err(ConfigError::InvalidPeriod { field, value });
            }
        }

        let multipliers = [
            ("atrMultiplier", self.atr_multiplier),
            ("volMultiplierScalp", self.vol_multiplier_scalp),
            ("volMultiplierIntraday", self.vol_multiplier_intraday),
        ];
        for (field, value) in multipliers {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidMultiplier { field, value });
            }
        }

        Ok(())
    }

    /// Shallow merge: every supplied top-level field replaces the current one.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        Self {
            mode: patch.mode.unwrap_or(self.mode),
            risk_per_trade: patch.risk_per_trade.unwrap_or(self.risk_per_trade),
            max_trades: patch.max_trades.unwrap_or(self.max_trades),
            ema_short: patch.ema_short.unwrap_or(self.ema_short),
            ema_mid: patch.ema_mid.unwrap_or(self.ema_mid),
            ema_long: patch.ema_long.unwrap_or(self.ema_long),
            atr_period: patch.atr_period.unwrap_or(self.atr_period),
            atr_multiplier: patch.atr_multiplier.unwrap_or(self.atr_multiplier),
            vol_multiplier_scalp: patch.vol_multiplier_scalp.unwrap_or(self.vol_multiplier_scalp),
            vol_multiplier_intraday: patch
                .vol_multiplier_intraday
                .unwrap_or(self.vol_multiplier_intraday),
            safety: patch.safety.unwrap_or(self.safety),
        }
    }
}

/// Partial update accepted by the settings endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    pub mode: Option<Mode>,
    pub risk_per_trade: Option<f64>,
    pub max_trades: Option<u32>,
    pub ema_short: Option<u32>,
    pub ema_mid: Option<u32>,
    pub ema_long: Option<u32>,
    pub atr_period: Option<u32>,
    pub atr_multiplier: Option<f64>,
    pub vol_multiplier_scalp: Option<f64>,
    pub vol_multiplier_intraday: Option<f64>,
    pub safety: Option<SafetyConfig>,
}
