//! Single-flight execution of scan cycles and delivery of their results

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::ScanError;
use crate::metrics::Metrics;
use crate::models::{CycleSummary, ScanCycle, TriggerSource};
use crate::services::notifier::SignalDispatcher;

use super::scanner::ScanOrchestrator;

/// Held for the duration of a cycle; releases the in-progress flag on drop.
#[derive(Debug)]
pub struct CycleGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct ScanRuntime {
    orchestrator: ScanOrchestrator,
    dispatcher: SignalDispatcher,
    in_progress: Arc<AtomicBool>,
    last_cycle: RwLock<Option<CycleSummary>>,
    metrics: Option<Arc<Metrics>>,
}

impl ScanRuntime {
    pub fn new(orchestrator: ScanOrchestrator, dispatcher: SignalDispatcher) -> Self {
        Self {
            orchestrator,
            dispatcher,
            in_progress: Arc::new(AtomicBool::new(false)),
            last_cycle: RwLock::new(None),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    pub async fn last_cycle(&self) -> Option<CycleSummary> {
        self.last_cycle.read().await.clone()
    }

    /// Claim the in-progress flag without waiting. Fails if a cycle is running.
    pub fn try_acquire(&self) -> Result<CycleGuard, ScanError> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            if let Some(ref metrics) = self.metrics {
                metrics.scan_triggers_rejected_total.inc();
            }
            return Err(ScanError::CycleInProgress);
        }
        Ok(CycleGuard {
            flag: self.in_progress.clone(),
        })
    }

    /// Acquire and run in one step
    pub async fn trigger(&self, source: TriggerSource) -> Result<CycleSummary, ScanError> {
        let guard = self.try_acquire()?;
        self.run_cycle(guard, source).await
    }

    /// Run a cycle under an already-held guard, then dispatch its signals.
    ///
    /// Manual triggers always report back, even when nothing was found or the
    /// universe could not be listed.
    pub async fn run_cycle(
        &self,
        _guard: CycleGuard,
        source: TriggerSource,
    ) -> Result<CycleSummary, ScanError> {
        let announce = source == TriggerSource::Manual;
        info!(source = ?source, "ScanRuntime: starting {:?} cycle", source);

        let started_at = chrono::Utc::now();
        let result = self.orchestrator.run_cycle().await;

        match result {
            Ok(cycle) => {
                self.record_success(&cycle);
                let report = self.dispatcher.dispatch(&cycle, announce).await;
                if report.failed > 0 {
                    warn!(
                        delivered = report.delivered,
                        failed = report.failed,
                        "ScanRuntime: {} notifications failed",
                        report.failed
                    );
                }
                let summary = cycle.summary();
                *self.last_cycle.write().await = Some(summary.clone());
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, "ScanRuntime: cycle aborted");
                if let Some(ref metrics) = self.metrics {
                    metrics.scan_cycle_failures_total.inc();
                }
                if announce {
                    self.dispatcher.dispatch_failure(&e.to_string()).await;
                }
                *self.last_cycle.write().await =
                    Some(CycleSummary::failed(started_at, e.to_string()));
                Err(e)
            }
        }
    }

    fn record_success(&self, cycle: &ScanCycle) {
        if let Some(ref metrics) = self.metrics {
            metrics.scan_cycles_total.inc();
            metrics
                .scan_cycle_duration_seconds
                .observe(cycle.elapsed().as_secs_f64());
        }
    }
}
