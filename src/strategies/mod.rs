//! Rule strategies that turn indicator snapshots into trade signals.
//!
//! Each strategy declares the intervals it needs and receives the analyzed
//! series for those intervals, in the same order.

pub mod kdj;
pub mod liquidity;
pub mod multi_timeframe;
pub mod trend_level;

use std::sync::Arc;

use crate::indicators::AnalyzedSeries;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::SignalDirection;
use crate::models::strategy::{StrategyConfig, StrategyKind};

pub use kdj::{KdjMode, KdjStrategy};
pub use liquidity::LiquidityMomentumStrategy;
pub use multi_timeframe::MultiTimeframeStrategy;
pub use trend_level::{TrendLevelMode, TrendLevelStrategy};

/// Outcome of a strategy that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySignal {
    pub direction: SignalDirection,
    pub price: f64,
    pub reason: String,
    pub snapshot: IndicatorSnapshot,
}

impl StrategySignal {
    pub fn new(direction: SignalDirection, snapshot: &IndicatorSnapshot, reason: String) -> Self {
        Self {
            direction,
            price: snapshot.close,
            reason,
            snapshot: snapshot.clone(),
        }
    }
}

pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Intervals whose series are passed to [`Strategy::evaluate`], in order
    fn intervals(&self) -> Vec<String>;

    /// How many trailing warm snapshots the rule looks at
    fn snapshots_required(&self) -> usize {
        1
    }

    fn evaluate(&self, series: &[&AnalyzedSeries]) -> Option<StrategySignal>;
}

pub fn build_strategy(kind: StrategyKind, config: &StrategyConfig) -> Arc<dyn Strategy> {
    match kind {
        StrategyKind::TrendLevel => Arc::new(TrendLevelStrategy::new(
            config.primary_interval.clone(),
            config.levels.clone(),
            config.strict_trend,
            TrendLevelMode::Proximity,
        )),
        StrategyKind::TrendBreakout => Arc::new(TrendLevelStrategy::new(
            config.primary_interval.clone(),
            config.levels.clone(),
            config.strict_trend,
            TrendLevelMode::Breakout,
        )),
        StrategyKind::MultiTimeframe => Arc::new(MultiTimeframeStrategy::new(
            config.primary_interval.clone(),
            config.confirm_interval.clone(),
            config.levels.clone(),
            config.strict_trend,
        )),
        StrategyKind::KdjCross => Arc::new(KdjStrategy::new(
            config.primary_interval.clone(),
            KdjMode::Crossover,
        )),
        StrategyKind::KdjState => Arc::new(KdjStrategy::new(
            config.primary_interval.clone(),
            KdjMode::Continuous,
        )),
        StrategyKind::LiquidityMomentum => Arc::new(LiquidityMomentumStrategy::new(
            config.primary_interval.clone(),
            config.stoch_rsi_threshold,
        )),
    }
}

/// Builds every selected strategy, dropping duplicate selections
pub fn build_strategies(kinds: &[StrategyKind], config: &StrategyConfig) -> Vec<Arc<dyn Strategy>> {
    let mut seen = Vec::new();
    kinds
        .iter()
        .filter(|kind| {
            if seen.contains(*kind) {
                false
            } else {
                seen.push(**kind);
                true
            }
        })
        .map(|&kind| build_strategy(kind, config))
        .collect()
}
