//! Series-level indicator pipeline.
//!
//! Folds a [`CandleSeries`] left to right through every streaming indicator and
//! emits one optional [`IndicatorSnapshot`] per candle. An index gets a
//! snapshot only once every indicator is warm.

use serde::{Deserialize, Serialize};

use crate::indicators::momentum::{Kdj, Rsi, StochRsi};
use crate::indicators::structure::SuperTrend;
use crate::indicators::trend::Ema;
use crate::indicators::volume::Obv;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::{Candle, CandleSeries};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub stoch_window: usize,
    pub stoch_k: usize,
    pub stoch_d: usize,
    pub kdj_period: usize,
    pub kdj_k: usize,
    pub kdj_d: usize,
    pub atr_period: usize,
    pub supertrend_multiplier: f64,
    pub obv_sma: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ema_fast: 7,
            ema_mid: 25,
            ema_slow: 99,
            rsi_period: 14,
            stoch_window: 14,
            stoch_k: 3,
            stoch_d: 3,
            kdj_period: 9,
            kdj_k: 3,
            kdj_d: 3,
            atr_period: 10,
            supertrend_multiplier: 3.0,
            obv_sma: 10,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorPipeline {
    params: IndicatorParams,
}

impl IndicatorPipeline {
    pub fn new(params: IndicatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Number of candles needed before the first snapshot exists
    pub fn warmup_len(&self) -> usize {
        let p = &self.params;
        let ema = p.ema_fast.max(p.ema_mid).max(p.ema_slow).max(1);
        // RSI needs period + 1 closes, then each smoothing stage adds its window - 1
        let stoch_rsi = p.rsi_period.max(1)
            + p.stoch_window.max(1)
            + p.stoch_k.max(1)
            + p.stoch_d.max(1)
            - 2;
        [
            ema,
            stoch_rsi,
            p.kdj_period.max(1),
            p.atr_period.max(1),
            p.obv_sma.max(1),
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }

    /// One entry per candle; `None` wherever any indicator is still warming up
    pub fn compute(&self, candles: &[Candle]) -> Vec<Option<IndicatorSnapshot>> {
        let p = &self.params;
        let mut ema_fast = Ema::new(p.ema_fast);
        let mut ema_mid = Ema::new(p.ema_mid);
        let mut ema_slow = Ema::new(p.ema_slow);
        let mut rsi = Rsi::new(p.rsi_period);
        let mut stoch_rsi = StochRsi::new(p.stoch_window, p.stoch_k, p.stoch_d);
        let mut kdj = Kdj::new(p.kdj_period, p.kdj_k, p.kdj_d);
        let mut supertrend = SuperTrend::new(p.atr_period, p.supertrend_multiplier);
        let mut obv = Obv::new(p.obv_sma);

        candles
            .iter()
            .map(|candle| {
                let fast = ema_fast.update(candle.close);
                let mid = ema_mid.update(candle.close);
                let slow = ema_slow.update(candle.close);
                let rsi_value = rsi.update(candle.close);
                let stoch = rsi_value.and_then(|value| stoch_rsi.update(value));
                let kdj_value = kdj.update(candle.high, candle.low, candle.close);
                let trend = supertrend.update(candle.high, candle.low, candle.close);
                let volume = obv.update(candle.close, candle.volume);

                Some(IndicatorSnapshot {
                    open_time: candle.open_time,
                    close: candle.close,
                    ema_fast: fast?,
                    ema_mid: mid?,
                    ema_slow: slow?,
                    rsi: rsi_value?,
                    stoch_rsi_k: stoch?.k,
                    stoch_rsi_d: stoch?.d,
                    kdj_k: kdj_value?.k,
                    kdj_d: kdj_value?.d,
                    kdj_j: kdj_value?.j,
                    supertrend: trend?.value,
                    supertrend_direction: trend?.direction,
                    obv: volume.obv,
                    obv_sma: volume.sma?,
                })
            })
            .collect()
    }

    pub fn analyze(&self, series: CandleSeries) -> AnalyzedSeries {
        let snapshots = self.compute(series.candles());
        AnalyzedSeries { series, snapshots }
    }
}

/// A candle series together with its aligned snapshots.
#[derive(Debug, Clone)]
pub struct AnalyzedSeries {
    series: CandleSeries,
    snapshots: Vec<Option<IndicatorSnapshot>>,
}

impl AnalyzedSeries {
    /// Pairs an existing series with precomputed snapshots; lengths must match.
    pub fn new(series: CandleSeries, snapshots: Vec<Option<IndicatorSnapshot>>) -> Option<Self> {
        (series.len() == snapshots.len()).then_some(Self { series, snapshots })
    }

    pub fn series(&self) -> &CandleSeries {
        &self.series
    }

    pub fn interval(&self) -> &str {
        self.series.interval()
    }

    pub fn snapshots(&self) -> &[Option<IndicatorSnapshot>] {
        &self.snapshots
    }

    /// Snapshot for the last candle, if it is warm
    pub fn latest(&self) -> Option<&IndicatorSnapshot> {
        self.snapshots.last()?.as_ref()
    }

    /// Snapshots for the last two candles, both warm
    pub fn latest_pair(&self) -> Option<(&IndicatorSnapshot, &IndicatorSnapshot)> {
        let n = self.snapshots.len();
        if n < 2 {
            return None;
        }
        let prev = self.snapshots[n - 2].as_ref()?;
        let current = self.snapshots[n - 1].as_ref()?;
        Some((prev, current))
    }

    pub fn valid_count(&self) -> usize {
        self.snapshots.iter().filter(|s| s.is_some()).count()
    }
}
