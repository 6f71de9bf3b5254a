//! StochRSI, SuperTrend and OBV must all agree

use crate::indicators::AnalyzedSeries;
use crate::models::indicators::SuperTrendDirection;
use crate::models::signal::SignalDirection;

use super::{Strategy, StrategySignal};

#[derive(Debug, Clone)]
pub struct LiquidityMomentumStrategy {
    interval: String,
    stoch_threshold: f64,
}

impl LiquidityMomentumStrategy {
    pub fn new(interval: String, stoch_threshold: f64) -> Self {
        Self {
            interval,
            stoch_threshold,
        }
    }
}

impl Strategy for LiquidityMomentumStrategy {
    fn name(&self) -> &'static str {
        "liquidity_momentum"
    }

    fn intervals(&self) -> Vec<String> {
        vec![self.interval.clone()]
    }

    fn evaluate(&self, series: &[&AnalyzedSeries]) -> Option<StrategySignal> {
        let snapshot = series.first()?.latest()?;
        let momentum = snapshot.stoch_rsi_k > self.stoch_threshold;
        let trending = snapshot.supertrend_direction == SuperTrendDirection::Bullish;
        let accumulating = snapshot.obv > snapshot.obv_sma;
        if !(momentum && trending && accumulating) {
            return None;
        }

        Some(StrategySignal::new(
            SignalDirection::Buy,
            snapshot,
            format!(
                "StochRSI %K {:.1} > {:.0}, SuperTrend bullish, OBV above its average",
                snapshot.stoch_rsi_k, self.stoch_threshold
            ),
        ))
    }
}
