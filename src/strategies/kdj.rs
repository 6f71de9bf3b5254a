//! KDJ momentum rules

use crate::indicators::momentum::KdjPosition;
use crate::indicators::AnalyzedSeries;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::SignalDirection;

use super::{Strategy, StrategySignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdjMode {
    /// J moves from below both lines to above both (or the reverse)
    Crossover,
    /// J is currently above or below both lines; no transition needed
    Continuous,
}

#[derive(Debug, Clone)]
pub struct KdjStrategy {
    interval: String,
    mode: KdjMode,
}

fn position(snapshot: &IndicatorSnapshot) -> KdjPosition {
    KdjPosition::of(snapshot.kdj_k, snapshot.kdj_d, snapshot.kdj_j)
}

impl KdjStrategy {
    pub fn new(interval: String, mode: KdjMode) -> Self {
        Self { interval, mode }
    }

    fn crossover(&self, series: &AnalyzedSeries) -> Option<StrategySignal> {
        let (prev, current) = series.latest_pair()?;
        let direction = match (position(prev), position(current)) {
            (KdjPosition::BelowBoth, KdjPosition::AboveBoth) => SignalDirection::Buy,
            (KdjPosition::AboveBoth, KdjPosition::BelowBoth) => SignalDirection::Sell,
            _ => return None,
        };
        Some(StrategySignal::new(
            direction,
            current,
            format!(
                "KDJ cross: J {:.2} -> {:.2} vs K {:.2} / D {:.2}",
                prev.kdj_j, current.kdj_j, current.kdj_k, current.kdj_d
            ),
        ))
    }

    fn continuous(&self, series: &AnalyzedSeries) -> Option<StrategySignal> {
        let current = series.latest()?;
        let (direction, side) = match position(current) {
            KdjPosition::AboveBoth => (SignalDirection::Buy, "above"),
            KdjPosition::BelowBoth => (SignalDirection::Sell, "below"),
            KdjPosition::Between => return None,
        };
        Some(StrategySignal::new(
            direction,
            current,
            format!(
                "KDJ state: J {:.2} {} K {:.2} and D {:.2}",
                current.kdj_j, side, current.kdj_k, current.kdj_d
            ),
        ))
    }
}

impl Strategy for KdjStrategy {
    fn name(&self) -> &'static str {
        match self.mode {
            KdjMode::Crossover => "kdj_cross",
            KdjMode::Continuous => "kdj_state",
        }
    }

    fn intervals(&self) -> Vec<String> {
        vec![self.interval.clone()]
    }

    fn snapshots_required(&self) -> usize {
        match self.mode {
            KdjMode::Crossover => 2,
            KdjMode::Continuous => 1,
        }
    }

    fn evaluate(&self, series: &[&AnalyzedSeries]) -> Option<StrategySignal> {
        let primary = series.first()?;
        match self.mode {
            KdjMode::Crossover => self.crossover(primary),
            KdjMode::Continuous => self.continuous(primary),
        }
    }
}
