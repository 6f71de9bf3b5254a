use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::indicators::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl std::fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalDirection::Buy => write!(f, "BUY"),
            SignalDirection::Sell => write!(f, "SELL"),
        }
    }
}

/// A fired rule, ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub symbol: String,
    pub interval: String,
    pub direction: SignalDirection,
    pub strategy: String,
    pub price: f64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: IndicatorSnapshot,
}
