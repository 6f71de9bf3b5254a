//! Shared builders for unit tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use falcon::indicators::momentum::Rsi;
use falcon::indicators::trend::Ema;
use falcon::indicators::{AnalyzedSeries, IndicatorPipeline};
use falcon::models::{Candle, CandleSeries, IndicatorSnapshot};

pub fn start_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

/// Hourly candles with a 0.1 high/low spread around each close
pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                close,
                close + 0.05,
                close - 0.05,
                close,
                1000.0,
                start_time() + Duration::hours(i as i64),
            )
        })
        .collect()
}

pub fn rising_closes(count: usize, base: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| base + step * i as f64).collect()
}

/// EMA at every index of `values`; `None` before warm-up
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut ema = Ema::new(period);
    values.iter().map(|&v| ema.update(v)).collect()
}

/// EMA of the candle closes, evaluated at the last candle
pub fn last_ema(candles: &[Candle], period: usize) -> Option<f64> {
    let mut ema = Ema::new(period);
    candles.iter().fold(None, |_, c| ema.update(c.close))
}

pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut rsi = Rsi::new(period);
    closes.iter().map(|&c| rsi.update(c)).collect()
}

pub fn analyzed(interval: &str, closes: &[f64]) -> AnalyzedSeries {
    let series = CandleSeries::new("TESTUSDT", interval, candles_from_closes(closes))
        .expect("ordered candles");
    IndicatorPipeline::default().analyze(series)
}

/// Series whose trailing snapshots are given directly
pub fn from_snapshots(interval: &str, snapshots: Vec<IndicatorSnapshot>) -> AnalyzedSeries {
    let closes: Vec<f64> = snapshots.iter().map(|s| s.close).collect();
    let series = CandleSeries::new("TESTUSDT", interval, candles_from_closes(&closes))
        .expect("ordered candles");
    AnalyzedSeries::new(series, snapshots.into_iter().map(Some).collect())
        .expect("aligned snapshots")
}

pub fn kdj_snapshot(k: f64, d: f64, j: f64) -> IndicatorSnapshot {
    IndicatorSnapshot {
        close: 1.0,
        kdj_k: k,
        kdj_d: d,
        kdj_j: j,
        ..Default::default()
    }
}
