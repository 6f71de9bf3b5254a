//! Single-flight runtime and result dispatch

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};

use falcon::error::{FetchError, ScanError};
use falcon::metrics::Metrics;
use falcon::models::TriggerSource;

use crate::test_utils::{runtime, MockProvider, RecordingNotifier};

fn metrics() -> Arc<Metrics> {
    Arc::new(Metrics::new().expect("metrics initialization"))
}

#[tokio::test]
async fn manual_trigger_during_cycle_is_rejected() {
    let entered = Arc::new(Notify::new());
    let gate = Arc::new(Semaphore::new(0));
    let provider = Arc::new(MockProvider::market(3, &[]).with_gate(entered.clone(), gate.clone()));
    let notifier = Arc::new(RecordingNotifier::default());
    let metrics = metrics();
    let runtime = runtime(provider.clone(), notifier.clone(), metrics.clone());

    let scheduled = {
        let runtime = runtime.clone();
        tokio::spawn(async move { runtime.trigger(TriggerSource::Scheduled).await })
    };
    entered.notified().await;
    assert!(runtime.is_running());

    let rejected = runtime.trigger(TriggerSource::Manual).await;
    assert_eq!(rejected.unwrap_err(), ScanError::CycleInProgress);
    assert_eq!(metrics.scan_triggers_rejected_total.get(), 1);

    gate.add_permits(10);
    let summary = scheduled.await.unwrap().expect("scheduled cycle completes");
    assert_eq!(summary.scanned, 3);
    assert!(!runtime.is_running());

    // only the scheduled cycle listed the universe
    assert_eq!(provider.list_calls.load(std::sync::atomic::Ordering::SeqCst), 1);

    // the flag is free again
    let again = runtime.trigger(TriggerSource::Manual).await;
    assert!(again.is_ok());
}

#[tokio::test]
async fn guard_is_released_when_dropped() {
    let runtime = runtime(
        Arc::new(MockProvider::market(1, &[])),
        Arc::new(RecordingNotifier::default()),
        metrics(),
    );
    let guard = runtime.try_acquire().unwrap();
    assert!(runtime.is_running());
    assert!(runtime.try_acquire().is_err());
    drop(guard);
    assert!(!runtime.is_running());
    assert!(runtime.try_acquire().is_ok());
}

#[tokio::test]
async fn scheduled_cycle_dispatches_summary_and_signals() {
    let notifier = Arc::new(RecordingNotifier::default());
    let metrics = metrics();
    let runtime = runtime(
        Arc::new(MockProvider::market(2, &[])),
        notifier.clone(),
        metrics.clone(),
    );

    let summary = runtime.trigger(TriggerSource::Scheduled).await.unwrap();
    assert_eq!(summary.signals, 2);

    let messages = notifier.messages();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("Scan complete"));
    assert!(messages[1].contains("SYM0USDT"));

    assert_eq!(metrics.scan_cycles_total.get(), 1);
    assert_eq!(metrics.symbols_scanned_total.get(), 2);
    assert_eq!(metrics.signals_total.with_label_values(&["trend_level"]).get(), 2);
    assert_eq!(runtime.last_cycle().await, Some(summary));
}

#[tokio::test]
async fn quiet_scheduled_cycle_sends_nothing() {
    let notifier = Arc::new(RecordingNotifier::default());
    let runtime = runtime(
        Arc::new(MockProvider::market(2, &[0, 1])),
        notifier.clone(),
        metrics(),
    );

    let summary = runtime.trigger(TriggerSource::Scheduled).await.unwrap();
    assert_eq!(summary.skipped, 2);
    assert!(notifier.messages().is_empty());

    runtime.trigger(TriggerSource::Manual).await.unwrap();
    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test]
async fn universe_failure_is_recorded_and_announced_on_manual_trigger() {
    let notifier = Arc::new(RecordingNotifier::default());
    let metrics = metrics();
    let provider = Arc::new(
        MockProvider::market(2, &[]).with_universe_errors(vec![FetchError::Http { status: 502 }]),
    );
    let runtime = runtime(provider, notifier.clone(), metrics.clone());

    let err = runtime.trigger(TriggerSource::Manual).await.unwrap_err();
    assert!(matches!(err, ScanError::Universe(_)));
    assert!(!runtime.is_running());
    assert_eq!(metrics.scan_cycle_failures_total.get(), 1);

    let last = runtime.last_cycle().await.unwrap();
    assert!(last.error.unwrap().contains("symbol universe unavailable"));
    assert_eq!(notifier.messages().len(), 1);
    assert!(notifier.messages()[0].contains("Scan aborted"));

    // next cycle still runs
    assert!(runtime.trigger(TriggerSource::Scheduled).await.is_ok());
}

#[tokio::test]
async fn delivery_failures_do_not_fail_the_cycle() {
    let metrics = metrics();
    let runtime = runtime(
        Arc::new(MockProvider::market(2, &[])),
        Arc::new(RecordingNotifier::failing()),
        metrics.clone(),
    );

    let summary = runtime.trigger(TriggerSource::Scheduled).await.unwrap();
    assert_eq!(summary.signals, 2);
    assert_eq!(metrics.notifications_failed_total.get(), 3);
}

#[tokio::test]
async fn scheduler_ticks_and_stops() {
    use falcon::core::ScanScheduler;

    let provider = Arc::new(MockProvider::market(1, &[]));
    let runtime = runtime(provider.clone(), Arc::new(RecordingNotifier::default()), metrics());

    assert!(ScanScheduler::new(runtime.clone(), 0).is_none());

    let scheduler = ScanScheduler::new(runtime.clone(), 3600).unwrap();
    scheduler.start().await;
    assert!(scheduler.is_running().await);

    // first tick fires immediately
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(provider.list_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert!(runtime.last_cycle().await.is_some());

    scheduler.stop().await;
    assert!(!scheduler.is_running().await);
}
