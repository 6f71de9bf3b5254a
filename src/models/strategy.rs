//! Strategy selection and parameter models

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Selectable strategy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    TrendLevel,
    TrendBreakout,
    MultiTimeframe,
    KdjCross,
    KdjState,
    LiquidityMomentum,
}

impl StrategyKind {
    pub fn all() -> Vec<StrategyKind> {
        vec![
            StrategyKind::TrendLevel,
            StrategyKind::TrendBreakout,
            StrategyKind::MultiTimeframe,
            StrategyKind::KdjCross,
            StrategyKind::KdjState,
            StrategyKind::LiquidityMomentum,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::TrendLevel => "trend_level",
            StrategyKind::TrendBreakout => "trend_breakout",
            StrategyKind::MultiTimeframe => "multi_timeframe",
            StrategyKind::KdjCross => "kdj_cross",
            StrategyKind::KdjState => "kdj_state",
            StrategyKind::LiquidityMomentum => "liquidity_momentum",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        StrategyKind::all()
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown strategy '{}'", s.trim()))
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Support/resistance levels and the relative proximity tolerance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub supports: Vec<f64>,
    pub resistances: Vec<f64>,
    pub tolerance: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            supports: vec![0.1530, 0.1450, 0.1380],
            resistances: vec![0.1594, 0.1639, 0.1700],
            tolerance: 0.01,
        }
    }
}

/// Parameters shared by all strategy variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub primary_interval: String,
    pub confirm_interval: String,
    pub levels: LevelConfig,
    pub strict_trend: bool,
    pub stoch_rsi_threshold: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            primary_interval: "1h".to_string(),
            confirm_interval: "4h".to_string(),
            levels: LevelConfig::default(),
            strict_trend: false,
            stoch_rsi_threshold: 80.0,
        }
    }
}
