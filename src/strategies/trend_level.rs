//! Trend filter combined with support/resistance levels

use crate::indicators::structure::{breakout_level, nearest_level};
use crate::indicators::trend::is_uptrend;
use crate::indicators::AnalyzedSeries;
use crate::models::signal::SignalDirection;
use crate::models::strategy::LevelConfig;

use super::{Strategy, StrategySignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendLevelMode {
    /// Fire while price sits near a level during an uptrend
    Proximity,
    /// Fire only on the candle whose close first clears a resistance level
    Breakout,
}

#[derive(Debug, Clone)]
pub struct TrendLevelStrategy {
    interval: String,
    levels: LevelConfig,
    strict: bool,
    mode: TrendLevelMode,
}

impl TrendLevelStrategy {
    pub fn new(interval: String, levels: LevelConfig, strict: bool, mode: TrendLevelMode) -> Self {
        Self {
            interval,
            levels,
            strict,
            mode,
        }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Level checks for a series already known to be trending up
    pub(crate) fn check_levels(&self, series: &AnalyzedSeries) -> Option<StrategySignal> {
        match self.mode {
            TrendLevelMode::Proximity => self.check_proximity(series),
            TrendLevelMode::Breakout => self.check_breakout(series),
        }
    }

    fn check_proximity(&self, series: &AnalyzedSeries) -> Option<StrategySignal> {
        let snapshot = series.latest()?;
        let tolerance = self.levels.tolerance;

        if let Some(level) = nearest_level(snapshot.close, &self.levels.resistances, tolerance) {
            return Some(StrategySignal::new(
                SignalDirection::Buy,
                snapshot,
                format!("uptrend near resistance {:.5}, breakout possible", level),
            ));
        }

        let level = nearest_level(snapshot.close, &self.levels.supports, tolerance)?;
        Some(StrategySignal::new(
            SignalDirection::Buy,
            snapshot,
            format!("uptrend bounce off support {:.5}", level),
        ))
    }

    fn check_breakout(&self, series: &AnalyzedSeries) -> Option<StrategySignal> {
        let (prev, current) = series.latest_pair()?;
        let level = breakout_level(
            prev.close,
            current.close,
            &self.levels.resistances,
            self.levels.tolerance,
        )?;
        Some(StrategySignal::new(
            SignalDirection::Buy,
            current,
            format!(
                "breakout above resistance {:.5} (previous close {:.5})",
                level, prev.close
            ),
        ))
    }
}

impl Strategy for TrendLevelStrategy {
    fn name(&self) -> &'static str {
        match self.mode {
            TrendLevelMode::Proximity => "trend_level",
            TrendLevelMode::Breakout => "trend_breakout",
        }
    }

    fn intervals(&self) -> Vec<String> {
        vec![self.interval.clone()]
    }

    fn snapshots_required(&self) -> usize {
        match self.mode {
            TrendLevelMode::Proximity => 1,
            TrendLevelMode::Breakout => 2,
        }
    }

    fn evaluate(&self, series: &[&AnalyzedSeries]) -> Option<StrategySignal> {
        let primary = series.first()?;
        if !is_uptrend(primary.latest()?, self.strict) {
            return None;
        }
        self.check_levels(primary)
    }
}
