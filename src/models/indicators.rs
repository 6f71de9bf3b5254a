use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuperTrendDirection {
    #[default]
    Bullish,
    Bearish,
}

/// Every indicator value for one candle index.
///
/// Only produced once all indicators are past their warm-up, so every field
/// is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub open_time: DateTime<Utc>,
    pub close: f64,
    pub ema_fast: f64,
    pub ema_mid: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    pub stoch_rsi_k: f64,
    pub stoch_rsi_d: f64,
    pub kdj_k: f64,
    pub kdj_d: f64,
    pub kdj_j: f64,
    pub supertrend: f64,
    pub supertrend_direction: SuperTrendDirection,
    pub obv: f64,
    pub obv_sma: f64,
}
