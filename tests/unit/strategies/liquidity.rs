//! Unit tests for the liquidity/momentum composite

use falcon::models::{IndicatorSnapshot, SignalDirection, SuperTrendDirection};
use falcon::strategies::{LiquidityMomentumStrategy, Strategy};

use crate::test_utils::from_snapshots;

fn snapshot(
    stoch_k: f64,
    direction: SuperTrendDirection,
    obv: f64,
    obv_sma: f64,
) -> IndicatorSnapshot {
    IndicatorSnapshot {
        close: 0.25,
        stoch_rsi_k: stoch_k,
        supertrend_direction: direction,
        obv,
        obv_sma,
        ..Default::default()
    }
}

#[test]
fn test_fires_when_all_conditions_hold() {
    let s = LiquidityMomentumStrategy::new("1h".to_string(), 80.0);
    let series = from_snapshots(
        "1h",
        vec![snapshot(92.0, SuperTrendDirection::Bullish, 10.0, 5.0)],
    );
    let signal = s.evaluate(&[&series]).unwrap();
    assert_eq!(signal.direction, SignalDirection::Buy);
    assert_eq!(signal.price, 0.25);
}

#[test]
fn test_any_failing_condition_blocks() {
    let s = LiquidityMomentumStrategy::new("1h".to_string(), 80.0);
    for snap in [
        snapshot(70.0, SuperTrendDirection::Bullish, 10.0, 5.0),
        snapshot(92.0, SuperTrendDirection::Bearish, 10.0, 5.0),
        snapshot(92.0, SuperTrendDirection::Bullish, 5.0, 10.0),
    ] {
        let series = from_snapshots("1h", vec![snap]);
        assert!(s.evaluate(&[&series]).is_none());
    }
}
