//! Fixed-interval scan scheduler

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::models::TriggerSource;

use super::runtime::ScanRuntime;

/// Triggers a scheduled cycle every `interval`. A tick that lands while a
/// cycle is running is dropped by the runtime, not queued.
pub struct ScanScheduler {
    runtime: Arc<ScanRuntime>,
    interval: Duration,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    /// `interval_seconds == 0` means scheduling is disabled and yields `None`.
    pub fn new(runtime: Arc<ScanRuntime>, interval_seconds: u64) -> Option<Self> {
        if interval_seconds == 0 {
            info!("ScanScheduler: disabled, SCAN_INTERVAL_SECONDS is 0");
            return None;
        }
        Some(Self {
            runtime,
            interval: Duration::from_secs(interval_seconds),
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking. The first tick fires immediately.
    pub async fn start(&self) {
        let runtime = self.runtime.clone();
        let period = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let guard = match runtime.try_acquire() {
                    Ok(guard) => guard,
                    Err(ScanError::CycleInProgress) => {
                        warn!("ScanScheduler: previous cycle still running, tick skipped");
                        continue;
                    }
                    Err(e) => {
                        warn!(error = %e, "ScanScheduler: tick rejected");
                        continue;
                    }
                };
                let runtime = runtime.clone();
                tokio::spawn(async move {
                    if let Err(e) = runtime.run_cycle(guard, TriggerSource::Scheduled).await {
                        debug!(error = %e, "ScanScheduler: scheduled cycle failed");
                    }
                });
            }
        });

        let mut h = self.handle.write().await;
        if let Some(previous) = h.replace(handle) {
            previous.abort();
        }
        info!(
            interval_secs = period.as_secs(),
            "ScanScheduler: started with interval {}s",
            period.as_secs()
        );
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
