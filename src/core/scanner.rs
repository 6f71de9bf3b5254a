//! One scan cycle over the symbol universe.
//!
//! Symbols are processed concurrently up to `workers`; every outbound call
//! still goes through the fetcher's shared pacing limiter.

use futures_util::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{FetchError, ScanError};
use crate::metrics::Metrics;
use crate::models::{ScanCycle, SignalEvent, SkipReason, SkippedSymbol};
use crate::services::fetcher::CandleFetcher;
use crate::services::universe::SymbolUniverse;
use crate::signals::SignalEngine;

/// What happened to a single symbol
#[derive(Debug)]
enum SymbolOutcome {
    Scanned(Vec<SignalEvent>),
    Skipped(SkipReason),
}

pub struct ScanOrchestrator {
    universe: SymbolUniverse,
    fetcher: CandleFetcher,
    engine: SignalEngine,
    lookback: usize,
    workers: usize,
    metrics: Option<Arc<Metrics>>,
}

impl ScanOrchestrator {
    pub fn new(universe: SymbolUniverse, fetcher: CandleFetcher, engine: SignalEngine) -> Self {
        Self {
            universe,
            fetcher,
            engine,
            lookback: 120,
            workers: 1,
            metrics: None,
        }
    }

    /// Candles requested per interval; raised to the warm-up requirement when lower
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run a full cycle. Only an unavailable universe fails the cycle.
    pub async fn run_cycle(&self) -> Result<ScanCycle, ScanError> {
        let mut cycle = ScanCycle::start();

        let symbols = self.universe.fetch().await.map_err(ScanError::Universe)?;
        cycle.attempted = symbols.len();

        let outcomes: Vec<(String, SymbolOutcome)> = stream::iter(symbols)
            .map(|info| async move {
                let outcome = self.scan_symbol(&info.symbol).await;
                (info.symbol, outcome)
            })
            .buffered(self.workers)
            .collect()
            .await;

        for (symbol, outcome) in outcomes {
            match outcome {
                SymbolOutcome::Scanned(signals) => {
                    cycle.scanned += 1;
                    cycle.signals.extend(signals);
                }
                SymbolOutcome::Skipped(reason) => {
                    cycle.skipped.push(SkippedSymbol { symbol, reason });
                }
            }
        }
        cycle.finish();

        if let Some(ref metrics) = self.metrics {
            metrics.symbols_scanned_total.inc_by(cycle.scanned as u64);
            metrics.symbols_skipped_total.inc_by(cycle.skipped_count() as u64);
            for signal in &cycle.signals {
                metrics
                    .signals_total
                    .with_label_values(&[signal.strategy.as_str()])
                    .inc();
            }
        }

        info!(
            attempted = cycle.attempted,
            scanned = cycle.scanned,
            skipped = cycle.skipped_count(),
            signals = cycle.signal_count(),
            elapsed_ms = cycle.elapsed().as_millis() as u64,
            "ScanOrchestrator: cycle complete, {} signals from {} symbols",
            cycle.signal_count(),
            cycle.scanned
        );
        Ok(cycle)
    }

    async fn scan_symbol(&self, symbol: &str) -> SymbolOutcome {
        let mut analyzed = HashMap::new();

        for interval in self.engine.required_intervals() {
            let limit = self.lookback.max(self.engine.candles_needed(&interval));
            match self.fetcher.fetch(symbol, &interval, limit).await {
                Ok(series) => {
                    analyzed.insert(interval, self.engine.analyze(series));
                }
                Err(error) => return SymbolOutcome::Skipped(skip_reason(symbol, interval, error)),
            }
        }

        let evaluation = self.engine.evaluate(symbol, &analyzed);
        if evaluation.evaluated == 0 {
            let (interval, have, need) = self
                .engine
                .required_intervals()
                .into_iter()
                .map(|interval| {
                    let have = analyzed.get(&interval).map_or(0, |s| s.series().len());
                    let need = self.engine.candles_needed(&interval);
                    (interval, have, need)
                })
                .find(|(_, have, need)| have < need)
                .unwrap_or_default();
            debug!(
                symbol = %symbol,
                interval = %interval,
                have = have,
                need = need,
                "ScanOrchestrator: skipping {}, not enough history",
                symbol
            );
            return SymbolOutcome::Skipped(SkipReason::InsufficientHistory {
                interval,
                have,
                need,
            });
        }

        for signal in &evaluation.signals {
            info!(
                symbol = %signal.symbol,
                strategy = %signal.strategy,
                direction = %signal.direction,
                price = signal.price,
                "ScanOrchestrator: {} {} signal on {}",
                signal.strategy,
                signal.direction,
                signal.symbol
            );
        }
        SymbolOutcome::Scanned(evaluation.signals)
    }
}

fn skip_reason(symbol: &str, interval: String, error: FetchError) -> SkipReason {
    match error {
        FetchError::Malformed(_) | FetchError::UnknownSymbol(_) => {
            warn!(
                symbol = %symbol,
                interval = %interval,
                error = %error,
                "ScanOrchestrator: skipping {}, bad response",
                symbol
            );
            SkipReason::Malformed {
                interval,
                error: error.to_string(),
            }
        }
        _ => {
            info!(
                symbol = %symbol,
                interval = %interval,
                error = %error,
                "ScanOrchestrator: skipping {}, fetch failed",
                symbol
            );
            SkipReason::FetchFailed {
                interval,
                error: error.to_string(),
            }
        }
    }
}
