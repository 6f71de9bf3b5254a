//! Trend+Level gated by an uptrend on a second, higher interval

use crate::indicators::trend::is_uptrend;
use crate::indicators::AnalyzedSeries;
use crate::models::strategy::LevelConfig;

use super::trend_level::{TrendLevelMode, TrendLevelStrategy};
use super::{Strategy, StrategySignal};

#[derive(Debug, Clone)]
pub struct MultiTimeframeStrategy {
    primary: String,
    confirm: String,
    levels: TrendLevelStrategy,
}

impl MultiTimeframeStrategy {
    pub fn new(primary: String, confirm: String, levels: LevelConfig, strict: bool) -> Self {
        let levels =
            TrendLevelStrategy::new(primary.clone(), levels, strict, TrendLevelMode::Proximity);
        Self {
            primary,
            confirm,
            levels,
        }
    }
}

impl Strategy for MultiTimeframeStrategy {
    fn name(&self) -> &'static str {
        "multi_timeframe"
    }

    fn intervals(&self) -> Vec<String> {
        vec![self.primary.clone(), self.confirm.clone()]
    }

    fn evaluate(&self, series: &[&AnalyzedSeries]) -> Option<StrategySignal> {
        let [primary, confirm] = series else {
            return None;
        };
        let strict = self.levels.strict();
        if !is_uptrend(primary.latest()?, strict) || !is_uptrend(confirm.latest()?, strict) {
            return None;
        }

        let mut signal = self.levels.check_levels(primary)?;
        signal.reason = format!(
            "{} ({} and {} trends agree)",
            signal.reason, self.primary, self.confirm
        );
        Some(signal)
    }
}
