//! Unit tests for the trend + level strategies

use falcon::indicators::{AnalyzedSeries, IndicatorPipeline};
use falcon::models::{CandleSeries, IndicatorSnapshot, LevelConfig, SignalDirection};
use falcon::strategies::{Strategy, TrendLevelMode, TrendLevelStrategy};

use crate::test_utils::{analyzed, candles_from_closes, from_snapshots, rising_closes};

fn levels(supports: Vec<f64>, resistances: Vec<f64>) -> LevelConfig {
    LevelConfig {
        supports,
        resistances,
        tolerance: 0.01,
    }
}

fn strategy(levels: LevelConfig, mode: TrendLevelMode) -> TrendLevelStrategy {
    TrendLevelStrategy::new("1h".to_string(), levels, false, mode)
}

#[test]
fn test_proximity_fires_near_resistance_in_uptrend() {
    let closes = rising_closes(120, 100.0, 0.1);
    let series = analyzed("1h", &closes);
    let last = *closes.last().unwrap();
    let s = strategy(levels(vec![], vec![last * 1.005]), TrendLevelMode::Proximity);

    let signal = s.evaluate(&[&series]).expect("signal near resistance");
    assert_eq!(signal.direction, SignalDirection::Buy);
    assert_eq!(signal.price, last);
    assert!(signal.reason.contains("resistance"));
    assert_eq!(s.name(), "trend_level");
}

#[test]
fn test_proximity_fires_near_support() {
    let closes = rising_closes(120, 100.0, 0.1);
    let series = analyzed("1h", &closes);
    let last = *closes.last().unwrap();
    let s = strategy(levels(vec![last * 0.995], vec![]), TrendLevelMode::Proximity);

    let signal = s.evaluate(&[&series]).unwrap();
    assert!(signal.reason.contains("support"));
}

#[test]
fn test_proximity_prefers_resistance() {
    let closes = rising_closes(120, 100.0, 0.1);
    let series = analyzed("1h", &closes);
    let last = *closes.last().unwrap();
    let s = strategy(
        levels(vec![last * 0.999], vec![last * 1.001]),
        TrendLevelMode::Proximity,
    );
    assert!(s.evaluate(&[&series]).unwrap().reason.contains("resistance"));
}

#[test]
fn test_no_signal_without_uptrend() {
    let closes = rising_closes(120, 200.0, -0.1);
    let series = analyzed("1h", &closes);
    let last = *closes.last().unwrap();
    let s = strategy(levels(vec![last], vec![last]), TrendLevelMode::Proximity);
    assert!(s.evaluate(&[&series]).is_none());
}

#[test]
fn test_no_signal_far_from_levels() {
    let series = analyzed("1h", &rising_closes(120, 100.0, 0.1));
    let s = strategy(LevelConfig::default(), TrendLevelMode::Proximity);
    assert!(s.evaluate(&[&series]).is_none());
}

#[test]
fn test_breakout_fires_once_on_the_crossing_candle() {
    let closes = rising_closes(150, 100.0, 0.1);
    let candles = candles_from_closes(&closes);
    let snapshots = IndicatorPipeline::default().compute(&candles);
    let s = strategy(levels(vec![], vec![110.05]), TrendLevelMode::Breakout);
    assert_eq!(s.name(), "trend_breakout");
    assert_eq!(s.snapshots_required(), 2);

    let mut fired = Vec::new();
    for end in 1..=candles.len() {
        let series = CandleSeries::new("TESTUSDT", "1h", candles[..end].to_vec()).unwrap();
        let prefix = AnalyzedSeries::new(series, snapshots[..end].to_vec()).unwrap();
        if let Some(signal) = s.evaluate(&[&prefix]) {
            fired.push((end - 1, signal.price));
        }
    }

    // close 110.0 at index 100, 110.1 at index 101
    assert_eq!(fired.len(), 1);
    let (index, price) = fired[0];
    assert_eq!(index, 101);
    assert_eq!(price, closes[101]);
}

#[test]
fn test_breakout_through_two_levels_reports_nearer_one() {
    let snapshot = |close: f64| IndicatorSnapshot {
        close,
        ema_fast: 0.1570,
        ema_mid: 0.1560,
        ema_slow: 0.1550,
        ..Default::default()
    };
    let series = from_snapshots("1h", vec![snapshot(0.15785), snapshot(0.1640)]);
    let s = strategy(
        levels(vec![], vec![0.1594, 0.1639, 0.1700]),
        TrendLevelMode::Breakout,
    );

    let signal = s.evaluate(&[&series]).expect("breakout of 0.1639");
    assert_eq!(signal.price, 0.1640);
    assert!(signal.reason.contains("0.16390"), "{}", signal.reason);
}
