//! End-to-end engine scenarios

use crate::support::{falling_candles, flat_candles, rising_candles, series, ts, BASE_VOLUME, SPIKE_VOLUME};
use nse_scanner::common::math::round2;
use nse_scanner::config::{SafetyConfig, StrategyConfig};
use nse_scanner::indicators::calculate_atr;
use nse_scanner::models::candle::Candle;
use nse_scanner::models::signal::SignalKind;
use nse_scanner::signals::SignalEngine;

fn no_confirm() -> StrategyConfig {
    StrategyConfig {
        safety: SafetyConfig {
            market_filter: true,
            confirm_close: false,
        },
        ..StrategyConfig::default()
    }
}

fn last_atr(candles: &[Candle], period: u32) -> f64 {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    calculate_atr(&highs, &lows, &closes, period)[candles.len() - 1].unwrap()
}

#[test]
fn scenario_flat_tape_never_trades() {
    let candles = flat_candles(60, 100.0, BASE_VOLUME);
    let signal = SignalEngine::evaluate("FLAT.NS", &series("FLAT.NS", candles), &StrategyConfig::default());
    assert_eq!(signal.signal, SignalKind::NoTrade);
    assert_eq!(signal.reason.as_deref(), Some("Low Volume (RVol: 1.00)"));
}

#[test]
fn scenario_clean_breakout_trades() {
    let signal = SignalEngine::evaluate(
        "UP.NS",
        &series("UP.NS", rising_candles(60, 50.0)),
        &StrategyConfig::default(),
    );
    assert!(signal.is_trade());
    let entry = signal.entry.unwrap();
    let stop = signal.stop_loss.unwrap();
    let target = signal.target.unwrap();
    assert!(stop < entry && entry < target);
}

#[test]
fn scenario_long_wick_buy_takes_atr_stop() {
    let mut candles = rising_candles(60, 50.0);
    candles[59] = Candle::new(109.0, 109.9, 107.0, 109.8, SPIKE_VOLUME, ts(59));
    let atr = last_atr(&candles, 14);

    let signal = SignalEngine::evaluate("WICK.NS", &series("WICK.NS", candles), &no_confirm());
    assert_eq!(signal.signal, SignalKind::Buy);
    let expected_stop = 109.9 - atr;
    assert!(expected_stop > 107.0);
    assert_eq!(signal.stop_loss, Some(round2(expected_stop)));
    assert_eq!(signal.target, Some(round2(109.9 + (109.9 - expected_stop) * 1.5)));
}

#[test]
fn scenario_long_wick_sell_takes_atr_stop() {
    let mut candles = falling_candles(60, 150.0);
    candles[59] = Candle::new(91.0, 93.0, 90.1, 90.2, SPIKE_VOLUME, ts(59));
    let atr = last_atr(&candles, 14);

    let signal = SignalEngine::evaluate("WICK.NS", &series("WICK.NS", candles), &no_confirm());
    assert_eq!(signal.signal, SignalKind::Sell);
    let expected_stop = 90.1 + atr;
    assert!(expected_stop < 93.0);
    assert_eq!(signal.stop_loss, Some(round2(expected_stop)));
}
