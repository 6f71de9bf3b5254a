//! Per-symbol signal evaluation: analyzed series in, signal events out.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::indicators::{AnalyzedSeries, IndicatorPipeline};
use crate::models::{CandleSeries, SignalEvent};
use crate::strategies::Strategy;

/// Result of running every strategy over one symbol.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub signals: Vec<SignalEvent>,
    /// Strategies that had enough history to run
    pub evaluated: usize,
}

pub struct SignalEngine {
    pipeline: IndicatorPipeline,
    strategies: Vec<Arc<dyn Strategy>>,
}

impl SignalEngine {
    pub fn new(pipeline: IndicatorPipeline, strategies: Vec<Arc<dyn Strategy>>) -> Self {
        Self {
            pipeline,
            strategies,
        }
    }

    pub fn strategies(&self) -> &[Arc<dyn Strategy>] {
        &self.strategies
    }

    /// Distinct intervals needed by the active strategies, first-use order
    pub fn required_intervals(&self) -> Vec<String> {
        let mut intervals: Vec<String> = Vec::new();
        for interval in self.strategies.iter().flat_map(|s| s.intervals()) {
            if !intervals.contains(&interval) {
                intervals.push(interval);
            }
        }
        intervals
    }

    /// Candles a strategy needs on each of its intervals
    pub fn min_candles(&self, strategy: &dyn Strategy) -> usize {
        self.pipeline.warmup_len() + strategy.snapshots_required().max(1) - 1
    }

    /// Largest requirement among strategies reading `interval`
    pub fn candles_needed(&self, interval: &str) -> usize {
        self.strategies
            .iter()
            .filter(|s| s.intervals().iter().any(|i| i == interval))
            .map(|s| self.min_candles(s.as_ref()))
            .max()
            .unwrap_or_else(|| self.pipeline.warmup_len())
    }

    pub fn analyze(&self, series: CandleSeries) -> AnalyzedSeries {
        self.pipeline.analyze(series)
    }

    /// Runs every strategy whose intervals all have enough history.
    pub fn evaluate(&self, symbol: &str, series: &HashMap<String, AnalyzedSeries>) -> Evaluation {
        let mut evaluation = Evaluation::default();

        for strategy in &self.strategies {
            let need = self.min_candles(strategy.as_ref());
            let inputs: Option<Vec<&AnalyzedSeries>> = strategy
                .intervals()
                .iter()
                .map(|interval| series.get(interval).filter(|s| s.series().len() >= need))
                .collect();
            let Some(inputs) = inputs else {
                debug!(
                    symbol = %symbol,
                    strategy = strategy.name(),
                    need = need,
                    "SignalEngine: not enough history for {} on {}",
                    strategy.name(),
                    symbol
                );
                continue;
            };
            evaluation.evaluated += 1;

            if let Some(signal) = strategy.evaluate(&inputs) {
                evaluation.signals.push(SignalEvent {
                    symbol: symbol.to_string(),
                    interval: inputs[0].interval().to_string(),
                    direction: signal.direction,
                    strategy: strategy.name().to_string(),
                    price: signal.price,
                    reason: signal.reason,
                    timestamp: Utc::now(),
                    snapshot: signal.snapshot,
                });
            }
        }

        evaluation
    }
}
