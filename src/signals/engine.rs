//! Per-symbol rule pipeline.
//!
//! Stages run in a fixed order and the first failing stage decides the
//! NO_TRADE reason. Every input, however malformed, ends in exactly one
//! `TradeSignal`.

use tracing::{debug, info};

use crate::common::math::round2;
use crate::config::StrategyConfig;
use crate::indicators::{
    calculate_atr, calculate_ema, calculate_rvol, calculate_vwap, DEFAULT_RVOL_PERIOD,
};
use crate::models::candle::{Candle, CandleSeries};
use crate::models::signal::{SignalMetrics, TradeSignal};
use crate::signals::decision::TradeSetup;
use crate::signals::filters;
use crate::signals::reason::NoTradeReason;
use crate::signals::thresholds::ModeThresholds;

/// Fixed floor, independent of the configured lookbacks.
pub const MIN_CANDLES: usize = 50;

pub const CONFIDENCE_LABEL: &str = "High";

/// Indicator readings at the signal candle
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub last_idx: usize,
    pub price: f64,
    pub ema_short: f64,
    pub ema_mid: f64,
    pub ema_long: f64,
    pub vwap: Option<f64>,
    pub atr: f64,
    pub atr_pct: f64,
    pub rvol: f64,
}

impl IndicatorSnapshot {
    pub fn compute(candles: &[Candle], config: &StrategyConfig) -> Result<Self, NoTradeReason> {
        let last_idx = candles
            .len()
            .checked_sub(1)
            .ok_or(NoTradeReason::InsufficientData)?;

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

        let ema_short = calculate_ema(&closes, config.ema_short);
        let ema_mid = calculate_ema(&closes, config.ema_mid);
        let ema_long = calculate_ema(&closes, config.ema_long);
        let vwap = calculate_vwap(candles);
        let atr = calculate_atr(&highs, &lows, &closes, config.atr_period);
        let rvol = calculate_rvol(&volumes, DEFAULT_RVOL_PERIOD);

        let price = closes[last_idx];
        if price <= 0.0 {
            return Err(NoTradeReason::InvalidData);
        }

        let atr = atr[last_idx].ok_or(NoTradeReason::InsufficientData)?;
        let atr_pct = atr / price * 100.0;
        if !atr_pct.is_finite() {
            return Err(NoTradeReason::InvalidData);
        }

        Ok(Self {
            last_idx,
            price,
            ema_short: ema_short[last_idx],
            ema_mid: ema_mid[last_idx],
            ema_long: ema_long[last_idx],
            vwap: vwap[last_idx],
            atr,
            atr_pct,
            rvol: rvol[last_idx].value(),
        })
    }
}

/// Filters passed and a setup was computed
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub snapshot: IndicatorSnapshot,
    pub thresholds: ModeThresholds,
    pub setup: TradeSetup,
    pub candle: Candle,
}

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate one symbol's series against a configuration snapshot.
    pub fn evaluate(symbol: &str, series: &CandleSeries, config: &StrategyConfig) -> TradeSignal {
        match Self::run(series, config) {
            Ok(evaluation) => {
                info!(
                    symbol = %symbol,
                    direction = ?evaluation.setup.direction,
                    entry = evaluation.setup.entry,
                    stop_loss = evaluation.setup.stop_loss,
                    target = evaluation.setup.target,
                    "Trade signal generated"
                );
                Self::to_signal(symbol, config, &evaluation)
            }
            Err(reason) => {
                debug!(symbol = %symbol, reason = %reason, "No trade");
                TradeSignal::no_trade(symbol, config.mode, reason.to_string())
            }
        }
    }

    /// Run every stage, stopping at the first failing one.
    pub fn run(series: &CandleSeries, config: &StrategyConfig) -> Result<Evaluation, NoTradeReason> {
        let candles = &series.candles;
        if candles.len() < MIN_CANDLES {
            return Err(NoTradeReason::InsufficientData);
        }
        if series.has_invalid_values() {
            return Err(NoTradeReason::InvalidData);
        }

        let snapshot = IndicatorSnapshot::compute(candles, config)?;
        let thresholds = ModeThresholds::for_mode(config);
        let last_idx = snapshot.last_idx;

        filters::check_volume(snapshot.rvol, &thresholds)?;
        filters::check_volatility(snapshot.atr_pct, &thresholds)?;
        filters::check_sideways(candles, last_idx, snapshot.atr)?;
        let direction = filters::classify_trend(&snapshot)?;

        let candle = candles[last_idx];
        filters::confirm_entry(&candle, &candles[last_idx - 1], config.safety.confirm_close)?;

        let setup = TradeSetup::compute(direction, &candle, snapshot.atr, &thresholds);
        if !setup.is_finite() {
            return Err(NoTradeReason::InvalidData);
        }
        Ok(Evaluation {
            snapshot,
            thresholds,
            setup,
            candle,
        })
    }

    fn to_signal(symbol: &str, config: &StrategyConfig, evaluation: &Evaluation) -> TradeSignal {
        let Evaluation {
            snapshot,
            thresholds,
            setup,
            candle,
        } = evaluation;

        TradeSignal {
            symbol: symbol.to_string(),
            mode: config.mode,
            signal: setup.direction.into(),
            reason: None,
            entry: Some(round2(setup.entry)),
            stop_loss: Some(round2(setup.stop_loss)),
            target: Some(round2(setup.target)),
            current_price: Some(round2(snapshot.price)),
            risk_reward: Some(thresholds.risk_reward_label()),
            confidence: Some(CONFIDENCE_LABEL.to_string()),
            timestamp: Some(candle.time),
            metrics: Some(SignalMetrics {
                rvol: format!("{:.2}", snapshot.rvol),
                atr_pct: format!("{:.2}", snapshot.atr_pct),
            }),
        }
    }
}
