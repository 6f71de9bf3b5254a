//! Prometheus metrics for scan cycles, upstream calls and the HTTP surface

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub scan_cycles_total: IntCounter,
    pub scan_cycle_failures_total: IntCounter,
    pub scan_triggers_rejected_total: IntCounter,
    pub symbols_scanned_total: IntCounter,
    pub symbols_skipped_total: IntCounter,
    pub signals_total: IntCounterVec,
    pub candle_requests_total: IntCounter,
    pub notifications_failed_total: IntCounter,
    pub scan_cycle_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter, prometheus::Error> {
    let counter = IntCounter::new(name, help)?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let signals_total = IntCounterVec::new(
            Opts::new("signals_total", "Signals found, by strategy"),
            &["strategy"],
        )?;
        registry.register(Box::new(signals_total.clone()))?;

        let scan_cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "scan_cycle_duration_seconds",
                "Wall-clock duration of completed scan cycles",
            )
            .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        )?;
        registry.register(Box::new(scan_cycle_duration_seconds.clone()))?;

        Ok(Self {
            scan_cycles_total: counter(&registry, "scan_cycles_total", "Completed scan cycles")?,
            scan_cycle_failures_total: counter(
                &registry,
                "scan_cycle_failures_total",
                "Cycles aborted because the symbol universe was unavailable",
            )?,
            scan_triggers_rejected_total: counter(
                &registry,
                "scan_triggers_rejected_total",
                "Triggers rejected because a cycle was already running",
            )?,
            symbols_scanned_total: counter(
                &registry,
                "symbols_scanned_total",
                "Symbols fully evaluated",
            )?,
            symbols_skipped_total: counter(
                &registry,
                "symbols_skipped_total",
                "Symbols skipped after a fetch failure or short history",
            )?,
            candle_requests_total: counter(
                &registry,
                "candle_requests_total",
                "Outbound candle requests",
            )?,
            notifications_failed_total: counter(
                &registry,
                "notifications_failed_total",
                "Messages the notification channel did not accept",
            )?,
            http_requests_total: counter(&registry, "http_requests_total", "HTTP requests served")?,
            signals_total,
            scan_cycle_duration_seconds,
            registry,
        })
    }

    /// Text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
