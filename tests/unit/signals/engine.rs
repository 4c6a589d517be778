//! Unit tests for the signal engine pipeline

use crate::support::{falling_candles, flat_candles, rising_candles, series, ts, BASE_VOLUME, SPIKE_VOLUME};
use nse_scanner::config::{Mode, SafetyConfig, StrategyConfig};
use nse_scanner::models::candle::Candle;
use nse_scanner::models::signal::SignalKind;
use nse_scanner::signals::{NoTradeReason, SignalEngine, MIN_CANDLES};

fn config(mode: Mode, confirm_close: bool) -> StrategyConfig {
    StrategyConfig {
        mode,
        safety: SafetyConfig {
            market_filter: true,
            confirm_close,
        },
        ..StrategyConfig::default()
    }
}

fn reason_for(candles: Vec<Candle>, config: &StrategyConfig) -> String {
    let signal = SignalEngine::evaluate("TEST.NS", &series("TEST.NS", candles), config);
    assert_eq!(signal.signal, SignalKind::NoTrade);
    signal.reason.expect("no-trade carries a reason")
}

#[test]
fn test_uptrend_generates_buy() {
    let cfg = StrategyConfig::default();
    let candles = rising_candles(60, 50.0);
    let last_time = candles[59].time;
    let signal = SignalEngine::evaluate("UP.NS", &series("UP.NS", candles), &cfg);

    assert_eq!(signal.signal, SignalKind::Buy);
    assert_eq!(signal.mode, Mode::Intraday);
    assert_eq!(signal.reason, None);
    assert_eq!(signal.entry, Some(109.9));
    assert_eq!(signal.stop_loss, Some(108.9));
    assert_eq!(signal.target, Some(111.4));
    assert_eq!(signal.current_price, Some(109.8));
    assert_eq!(signal.risk_reward.as_deref(), Some("1:1.5"));
    assert_eq!(signal.confidence.as_deref(), Some("High"));
    assert_eq!(signal.timestamp, Some(last_time));

    let metrics = signal.metrics.expect("trade carries metrics");
    assert_eq!(metrics.rvol, "2.50");
    assert_eq!(metrics.atr_pct, "1.00");
}

#[test]
fn test_downtrend_generates_sell() {
    let signal = SignalEngine::evaluate(
        "DOWN.NS",
        &series("DOWN.NS", falling_candles(60, 150.0)),
        &StrategyConfig::default(),
    );

    assert_eq!(signal.signal, SignalKind::Sell);
    assert_eq!(signal.entry, Some(90.1));
    assert_eq!(signal.stop_loss, Some(91.1));
    assert_eq!(signal.target, Some(88.6));
    assert_eq!(signal.metrics.unwrap().atr_pct, "1.22");
}

#[test]
fn test_scalp_mode_uses_tighter_stop_and_one_to_one() {
    let cfg = config(Mode::Scalp, true);
    let signal = SignalEngine::evaluate("UP.NS", &series("UP.NS", rising_candles(60, 50.0)), &cfg);

    assert_eq!(signal.signal, SignalKind::Buy);
    assert_eq!(signal.mode, Mode::Scalp);
    assert_eq!(signal.stop_loss, Some(109.24));
    assert_eq!(signal.target, Some(110.56));
    assert_eq!(signal.risk_reward.as_deref(), Some("1:1"));
}

#[test]
fn test_too_few_candles_is_insufficient_data() {
    let cfg = StrategyConfig::default();
    assert_eq!(
        reason_for(rising_candles(MIN_CANDLES - 1, 50.0), &cfg),
        "Insufficient Data"
    );
    assert_eq!(reason_for(Vec::new(), &cfg), "Insufficient Data");
}

#[test]
fn test_atr_longer_than_series_is_insufficient_data() {
    let cfg = StrategyConfig {
        atr_period: 100,
        ..StrategyConfig::default()
    };
    assert_eq!(reason_for(rising_candles(60, 50.0), &cfg), "Insufficient Data");
}

#[test]
fn test_non_finite_values_are_invalid_data() {
    let mut candles = rising_candles(60, 50.0);
    candles[30].high = f64::NAN;
    assert_eq!(reason_for(candles, &StrategyConfig::default()), "Invalid Data");

    let mut candles = rising_candles(60, 50.0);
    candles[59].close = 0.0;
    assert_eq!(
        SignalEngine::run(&series("X.NS", candles), &StrategyConfig::default()).unwrap_err(),
        NoTradeReason::InvalidData
    );
}

#[test]
fn test_vanishing_price_is_invalid_data_not_infinite() {
    let mut candles = falling_candles(60, 150.0);
    candles[59] = Candle::new(91.0, 91.1, 1e-310, 1e-310, SPIKE_VOLUME, ts(59));

    let cfg = config(Mode::Intraday, false);
    let signal = SignalEngine::evaluate("TINY.NS", &series("TINY.NS", candles), &cfg);
    assert_eq!(signal.signal, SignalKind::NoTrade);
    assert_eq!(signal.reason.as_deref(), Some("Invalid Data"));
    assert!(signal.metrics.is_none());

    let json = serde_json::to_string(&signal).unwrap();
    assert!(!json.contains("inf"), "{}", json);
}

#[test]
fn test_low_volume_is_checked_first() {
    let reason = reason_for(flat_candles(60, 100.0, BASE_VOLUME), &StrategyConfig::default());
    assert_eq!(reason, "Low Volume (RVol: 1.00)");

    let mut candles = rising_candles(60, 50.0);
    candles[59].volume = 1300.0;
    assert_eq!(
        reason_for(candles, &StrategyConfig::default()),
        "Low Volume (RVol: 1.30)"
    );
}

#[test]
fn test_flat_prices_with_volume_spike_are_low_volatility() {
    let mut candles = flat_candles(60, 100.0, BASE_VOLUME);
    candles[59].volume = SPIKE_VOLUME;
    assert_eq!(
        reason_for(candles, &StrategyConfig::default()),
        "Low Volatility (ATR%: 0.00%)"
    );
}

#[test]
fn test_high_priced_stock_is_low_volatility() {
    let reason = reason_for(rising_candles(60, 1000.0), &StrategyConfig::default());
    assert!(reason.starts_with("Low Volatility (ATR%: "), "{}", reason);
}

#[test]
fn test_range_bound_stock_is_sideways() {
    let mut candles: Vec<Candle> = (0..60)
        .map(|i| Candle::new(100.0, 101.0, 99.0, 100.0, BASE_VOLUME, ts(i)))
        .collect();
    candles[59].volume = SPIKE_VOLUME;
    assert_eq!(reason_for(candles, &StrategyConfig::default()), "Sideways Stock");
}

#[test]
fn test_collapse_below_vwap_with_bullish_emas_is_no_trend() {
    let mut candles = rising_candles(60, 50.0);
    candles[59] = Candle::new(109.0, 109.1, 59.9, 60.0, SPIKE_VOLUME, ts(59));
    assert_eq!(reason_for(candles, &StrategyConfig::default()), "No Trend");
}

#[test]
fn test_weak_body_only_blocks_when_close_confirmation_is_on() {
    let mut candles = rising_candles(60, 50.0);
    candles[59] = Candle::new(109.0, 109.9, 108.9, 109.3, SPIKE_VOLUME, ts(59));

    assert_eq!(
        reason_for(candles.clone(), &config(Mode::Intraday, true)),
        "Weak Candle Body"
    );

    let signal = SignalEngine::evaluate("X.NS", &series("X.NS", candles), &config(Mode::Intraday, false));
    assert_eq!(signal.signal, SignalKind::Buy);
    assert_eq!(signal.metrics.unwrap().atr_pct, "1.01");
}

#[test]
fn test_lower_volume_than_previous_candle_is_rejected() {
    let mut candles = rising_candles(60, 50.0);
    candles[58].volume = 3000.0;
    assert_eq!(
        reason_for(candles, &StrategyConfig::default()),
        "Volume decreasing"
    );
}

#[test]
fn test_evaluation_is_deterministic() {
    let cfg = StrategyConfig::default();
    let s = series("UP.NS", rising_candles(60, 50.0));
    let first = serde_json::to_string(&SignalEngine::evaluate("UP.NS", &s, &cfg)).unwrap();
    let second = serde_json::to_string(&SignalEngine::evaluate("UP.NS", &s, &cfg)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_signal_json_shape() {
    let cfg = StrategyConfig::default();
    let trade = SignalEngine::evaluate("UP.NS", &series("UP.NS", rising_candles(60, 50.0)), &cfg);
    let json = serde_json::to_value(&trade).unwrap();
    assert_eq!(json["signal"], "BUY");
    assert_eq!(json["mode"], "INTRADAY");
    assert_eq!(json["stopLoss"], 108.9);
    assert_eq!(json["riskReward"], "1:1.5");
    assert_eq!(json["metrics"]["atrPct"], "1.00");
    assert!(json.get("reason").is_none());

    let none = SignalEngine::evaluate("X.NS", &series("X.NS", Vec::new()), &cfg);
    let json = serde_json::to_value(&none).unwrap();
    assert_eq!(json["signal"], "NO_TRADE");
    assert_eq!(json["reason"], "Insufficient Data");
    assert!(json.get("entry").is_none());
}
