//! Unit tests for the indicator pipeline

use falcon::indicators::{IndicatorParams, IndicatorPipeline};
use falcon::models::SuperTrendDirection;

use crate::test_utils::{analyzed, candles_from_closes, rising_closes};

fn small_params() -> IndicatorParams {
    IndicatorParams {
        ema_fast: 3,
        ema_mid: 5,
        ema_slow: 8,
        rsi_period: 5,
        stoch_window: 5,
        stoch_k: 2,
        stoch_d: 2,
        kdj_period: 3,
        kdj_k: 3,
        kdj_d: 3,
        atr_period: 3,
        supertrend_multiplier: 3.0,
        obv_sma: 3,
    }
}

#[test]
fn test_default_warmup_is_slow_ema() {
    assert_eq!(IndicatorPipeline::default().warmup_len(), 99);
}

#[test]
fn test_warmup_accounts_for_stoch_rsi_chain() {
    assert_eq!(IndicatorPipeline::new(small_params()).warmup_len(), 12);
}

#[test]
fn test_short_series_has_no_snapshot() {
    let pipeline = IndicatorPipeline::default();
    let candles = candles_from_closes(&rising_closes(98, 100.0, 0.1));
    let snapshots = pipeline.compute(&candles);
    assert_eq!(snapshots.len(), 98);
    assert!(snapshots.iter().all(Option::is_none));
}

#[test]
fn test_first_snapshot_at_warmup() {
    for pipeline in [
        IndicatorPipeline::default(),
        IndicatorPipeline::new(small_params()),
    ] {
        let candles = candles_from_closes(&rising_closes(120, 100.0, 0.1));
        let snapshots = pipeline.compute(&candles);
        let first = snapshots.iter().position(Option::is_some).unwrap();
        assert_eq!(first, pipeline.warmup_len() - 1);
        assert!(snapshots[first..].iter().all(Option::is_some));
    }
}

#[test]
fn test_snapshot_fields_track_candle() {
    let closes = rising_closes(120, 100.0, 0.1);
    let series = analyzed("1h", &closes);
    let latest = series.latest().unwrap();

    assert_eq!(latest.close, *closes.last().unwrap());
    assert_eq!(latest.open_time, series.series().last().unwrap().open_time);
    assert!(latest.close > latest.ema_fast);
    assert!(latest.ema_fast > latest.ema_mid);
    assert!(latest.ema_mid > latest.ema_slow);
    assert_eq!(latest.supertrend_direction, SuperTrendDirection::Bullish);
    assert!(latest.obv > latest.obv_sma);
    assert_eq!(series.valid_count(), 120 - 98);
}

#[test]
fn test_latest_pair_requires_two_warm_snapshots() {
    let series = analyzed("1h", &rising_closes(99, 100.0, 0.1));
    assert!(series.latest().is_some());
    assert!(series.latest_pair().is_none());

    let series = analyzed("1h", &rising_closes(100, 100.0, 0.1));
    let (prev, current) = series.latest_pair().unwrap();
    assert!(current.close > prev.close);
}
