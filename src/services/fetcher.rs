//! Paced candle retrieval for one symbol and interval

use std::sync::Arc;
use tracing::debug;

use crate::error::FetchError;
use crate::metrics::Metrics;
use crate::models::CandleSeries;
use crate::services::market_data::MarketDataProvider;
use crate::services::rate_limiter::PacingLimiter;

/// Smallest and largest lookback requested from the upstream
pub const MIN_LIMIT: usize = 30;
pub const MAX_LIMIT: usize = 210;

pub struct CandleFetcher {
    provider: Arc<dyn MarketDataProvider>,
    limiter: Arc<PacingLimiter>,
    metrics: Option<Arc<Metrics>>,
}

impl CandleFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>, limiter: Arc<PacingLimiter>) -> Self {
        Self {
            provider,
            limiter,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn limiter(&self) -> &Arc<PacingLimiter> {
        &self.limiter
    }

    /// Fetch up to `limit` candles (clamped to 30..=210). Errors stay with the caller.
    pub async fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<CandleSeries, FetchError> {
        let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
        self.limiter.acquire().await;
        if let Some(ref metrics) = self.metrics {
            metrics.candle_requests_total.inc();
        }

        let candles = self.provider.get_candles(symbol, interval, limit).await?;
        debug!(
            symbol = %symbol,
            interval = %interval,
            count = candles.len(),
            "CandleFetcher: fetched {} candles for {} {}",
            candles.len(),
            symbol,
            interval
        );
        CandleSeries::new(symbol, interval, candles)
    }
}
