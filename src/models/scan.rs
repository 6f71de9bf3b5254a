use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::signal::SignalEvent;

/// What started a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerSource {
    Scheduled,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    FetchFailed { interval: String, error: String },
    Malformed { interval: String, error: String },
    InsufficientHistory { interval: String, have: usize, need: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

/// Bookkeeping for one scan pass over the universe.
#[derive(Debug, Clone)]
pub struct ScanCycle {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub attempted: usize,
    pub scanned: usize,
    pub skipped: Vec<SkippedSymbol>,
    pub signals: Vec<SignalEvent>,
}

impl ScanCycle {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            attempted: 0,
            scanned: 0,
            skipped: Vec::new(),
            signals: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .unwrap_or_else(Utc::now)
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or_default()
    }

    pub fn summary(&self) -> CycleSummary {
        CycleSummary {
            started_at: self.started_at,
            finished_at: self.finished_at,
            attempted: self.attempted,
            scanned: self.scanned,
            skipped: self.skipped_count(),
            signals: self.signal_count(),
            elapsed_ms: self.elapsed().as_millis() as u64,
            error: None,
        }
    }
}

/// Serializable outcome of the most recent cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub attempted: usize,
    pub scanned: usize,
    pub skipped: usize,
    pub signals: usize,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CycleSummary {
    pub fn failed(started_at: DateTime<Utc>, error: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            started_at,
            finished_at: Some(now),
            attempted: 0,
            scanned: 0,
            skipped: 0,
            signals: 0,
            elapsed_ms: now
                .signed_duration_since(started_at)
                .num_milliseconds()
                .max(0) as u64,
            error: Some(error.into()),
        }
    }
}
