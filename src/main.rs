//! Falcon scanner service
//!
//! Loads configuration from the environment, runs scheduled scan cycles and
//! serves the health, metrics and manual-trigger endpoints.

use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

use falcon::config::Config;
use falcon::core::{start_server, AppState, ScanOrchestrator, ScanRuntime, ScanScheduler};
use falcon::indicators::IndicatorPipeline;
use falcon::logging::init_logging;
use falcon::metrics::Metrics;
use falcon::services::binance::{BinanceMarketDataProvider, BinanceRestClient};
use falcon::services::{
    CandleFetcher, LogNotifier, MarketDataProvider, Notifier, PacingLimiter, SignalDispatcher,
    SymbolUniverse, TelegramNotifier,
};
use falcon::signals::SignalEngine;
use falcon::strategies::build_strategies;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_logging(&config.environment);

    info!(
        environment = %config.environment,
        port = config.port,
        strategies = ?config.strategies,
        interval = %config.strategy.primary_interval,
        "Starting Falcon scanner"
    );

    let metrics = Arc::new(Metrics::new()?);
    let timeout = Duration::from_secs(config.request_timeout_seconds);

    let client = Arc::new(BinanceRestClient::new(&config.binance_base_url, timeout)?);
    let provider: Arc<dyn MarketDataProvider> = Arc::new(BinanceMarketDataProvider::new(client));
    let limiter = Arc::new(PacingLimiter::new(
        config.rate_limit_burst,
        config.requests_per_second as f64,
    ));

    let fetcher =
        CandleFetcher::new(provider.clone(), limiter.clone()).with_metrics(metrics.clone());
    let universe = SymbolUniverse::new(provider, config.universe.clone(), limiter)
        .with_retries(config.universe_retries);
    let engine = SignalEngine::new(
        IndicatorPipeline::new(config.indicators.clone()),
        build_strategies(&config.strategies, &config.strategy),
    );
    let orchestrator = ScanOrchestrator::new(universe, fetcher, engine)
        .with_lookback(config.klines_limit)
        .with_workers(config.workers)
        .with_metrics(metrics.clone());

    let notifier: Arc<dyn Notifier> = match config.telegram {
        Some(ref telegram) => Arc::new(TelegramNotifier::new(
            &telegram.base_url,
            &telegram.token,
            telegram.chat_id.clone(),
            timeout,
        )?),
        None => {
            warn!("TELEGRAM_TOKEN/TELEGRAM_CHAT_ID not set, signals will only be logged");
            Arc::new(LogNotifier)
        }
    };
    let dispatcher = SignalDispatcher::new(notifier).with_metrics(metrics.clone());

    let runtime =
        Arc::new(ScanRuntime::new(orchestrator, dispatcher).with_metrics(metrics.clone()));

    let scheduler = ScanScheduler::new(runtime.clone(), config.scan_interval_seconds);
    if let Some(ref scheduler) = scheduler {
        scheduler.start().await;
    }

    let state = AppState::new(runtime, metrics);
    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    signal::ctrl_c().await?;
    info!("Shutdown signal received");

    if let Some(ref scheduler) = scheduler {
        scheduler.stop().await;
    }
    server_handle.abort();

    Ok(())
}
