//! Unit tests for the individual pipeline stages

use crate::support::ts;
use nse_scanner::config::{Mode, StrategyConfig};
use nse_scanner::models::candle::Candle;
use nse_scanner::signals::filters::{
    body_ratio, check_sideways, check_volatility, check_volume, classify_trend, confirm_entry,
    is_buy_trend, is_sell_trend,
};
use nse_scanner::signals::{IndicatorSnapshot, ModeThresholds, NoTradeReason, TradeDirection};

fn snapshot(ema: (f64, f64, f64), price: f64, vwap: Option<f64>) -> IndicatorSnapshot {
    IndicatorSnapshot {
        last_idx: 59,
        price,
        ema_short: ema.0,
        ema_mid: ema.1,
        ema_long: ema.2,
        vwap,
        atr: 1.0,
        atr_pct: 1.0,
        rvol: 2.0,
    }
}

fn thresholds(mode: Mode) -> ModeThresholds {
    let config = StrategyConfig {
        mode,
        ..StrategyConfig::default()
    };
    ModeThresholds::for_mode(&config)
}

#[test]
fn test_thresholds_follow_mode() {
    let scalp = thresholds(Mode::Scalp);
    assert_eq!(scalp.min_rvol, 1.8);
    assert_eq!(scalp.min_atr_pct, 0.35);
    assert_eq!(scalp.stop_multiplier, 0.6);
    assert_eq!(scalp.risk_reward_label(), "1:1");

    let intraday = thresholds(Mode::Intraday);
    assert_eq!(intraday.min_rvol, 1.4);
    assert_eq!(intraday.min_atr_pct, 0.6);
    assert_eq!(intraday.stop_multiplier, 1.0);
    assert_eq!(intraday.risk_reward_label(), "1:1.5");
}

#[test]
fn test_volume_gate_is_inclusive_at_threshold() {
    let t = thresholds(Mode::Intraday);
    assert!(check_volume(1.4, &t).is_ok());
    assert_eq!(
        check_volume(1.39, &t),
        Err(NoTradeReason::LowVolume { rvol: 1.39 })
    );
    assert_eq!(
        check_volume(1.39, &t).unwrap_err().to_string(),
        "Low Volume (RVol: 1.39)"
    );
}

#[test]
fn test_volatility_gate_renders_percent() {
    let t = thresholds(Mode::Scalp);
    assert!(check_volatility(0.35, &t).is_ok());
    let err = check_volatility(0.123, &t).unwrap_err();
    assert_eq!(err.to_string(), "Low Volatility (ATR%: 0.12%)");
}

#[test]
fn test_sideways_window_excludes_signal_candle() {
    // Lookback candles span exactly 1.0; the signal candle is huge.
    let mut candles: Vec<Candle> = (0..30)
        .map(|i| Candle::new(100.0, 100.5, 99.5, 100.0, 1000.0, ts(i)))
        .collect();
    candles[29] = Candle::new(100.0, 150.0, 50.0, 140.0, 5000.0, ts(29));

    assert_eq!(check_sideways(&candles, 29, 1.0), Err(NoTradeReason::Sideways));
    // 1.0 >= 1.2 * 0.8
    assert!(check_sideways(&candles, 29, 0.8).is_ok());
}

#[test]
fn test_sideways_needs_full_lookback() {
    let candles: Vec<Candle> = (0..10)
        .map(|i| Candle::new(100.0, 110.0, 90.0, 100.0, 1000.0, ts(i)))
        .collect();
    assert_eq!(
        check_sideways(&candles, 9, 1.0),
        Err(NoTradeReason::InsufficientData)
    );
}

#[test]
fn test_trend_classification() {
    let buy = snapshot((103.0, 102.0, 101.0), 104.0, Some(100.0));
    assert!(is_buy_trend(&buy));
    assert_eq!(classify_trend(&buy), Ok(TradeDirection::Buy));

    let sell = snapshot((97.0, 98.0, 99.0), 96.0, Some(100.0));
    assert!(is_sell_trend(&sell));
    assert_eq!(classify_trend(&sell), Ok(TradeDirection::Sell));

    let above_vwap_but_bearish_emas = snapshot((97.0, 98.0, 99.0), 101.0, Some(100.0));
    assert_eq!(
        classify_trend(&above_vwap_but_bearish_emas),
        Err(NoTradeReason::NoTrend)
    );

    let no_vwap = snapshot((103.0, 102.0, 101.0), 104.0, None);
    assert!(!is_buy_trend(&no_vwap));
    assert!(!is_sell_trend(&no_vwap));
}

#[test]
fn test_buy_and_sell_trends_are_mutually_exclusive() {
    let levels = [99.0, 100.0, 101.0];
    for &s in &levels {
        for &m in &levels {
            for &l in &levels {
                for &price in &levels {
                    let snap = snapshot((s, m, l), price, Some(100.0));
                    assert!(
                        !(is_buy_trend(&snap) && is_sell_trend(&snap)),
                        "{:?}",
                        snap
                    );
                }
            }
        }
    }
}

#[test]
fn test_body_ratio() {
    let strong = Candle::new(100.0, 101.0, 100.0, 100.8, 1.0, ts(0));
    assert!((body_ratio(&strong).unwrap() - 0.8).abs() < 1e-9);

    let doji = Candle::new(100.0, 100.0, 100.0, 100.0, 1.0, ts(0));
    assert_eq!(body_ratio(&doji), None);
}

#[test]
fn test_confirm_entry() {
    let previous = Candle::new(100.0, 101.0, 99.5, 100.5, 1000.0, ts(0));
    let strong = Candle::new(100.0, 101.0, 100.0, 100.8, 1500.0, ts(1));
    let weak = Candle::new(100.0, 101.0, 100.0, 100.3, 1500.0, ts(1));
    let thin = Candle::new(100.0, 101.0, 100.0, 100.8, 1000.0, ts(1));

    assert!(confirm_entry(&strong, &previous, true).is_ok());
    assert_eq!(
        confirm_entry(&weak, &previous, true),
        Err(NoTradeReason::WeakCandleBody)
    );
    assert!(confirm_entry(&weak, &previous, false).is_ok());
    // Equal volume counts as decreasing
    assert_eq!(
        confirm_entry(&thin, &previous, false),
        Err(NoTradeReason::VolumeDecreasing)
    );
}
