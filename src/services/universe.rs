//! Symbol universe: which instruments a cycle scans

use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::FetchError;
use crate::models::SymbolInfo;
use crate::services::market_data::MarketDataProvider;
use crate::services::rate_limiter::PacingLimiter;

#[derive(Debug, Clone, PartialEq)]
pub struct UniverseFilter {
    pub quote_asset: String,
    pub max_price: Option<f64>,
    pub min_quote_volume: Option<f64>,
}

impl Default for UniverseFilter {
    fn default() -> Self {
        Self {
            quote_asset: "USDT".to_string(),
            max_price: None,
            min_quote_volume: None,
        }
    }
}

impl UniverseFilter {
    pub fn accepts(&self, symbol: &SymbolInfo) -> bool {
        if symbol.quote_asset != self.quote_asset || !symbol.is_trading() {
            return false;
        }
        if let Some(max_price) = self.max_price {
            match symbol.last_price {
                Some(price) if price <= max_price => {}
                _ => return false,
            }
        }
        if let Some(min_volume) = self.min_quote_volume {
            match symbol.quote_volume {
                Some(volume) if volume >= min_volume => {}
                _ => return false,
            }
        }
        true
    }
}

pub struct SymbolUniverse {
    provider: Arc<dyn MarketDataProvider>,
    filter: UniverseFilter,
    limiter: Arc<PacingLimiter>,
    retries: usize,
}

impl SymbolUniverse {
    /// `limiter` is the same pacing budget the candle fetcher draws from
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        filter: UniverseFilter,
        limiter: Arc<PacingLimiter>,
    ) -> Self {
        Self {
            provider,
            filter,
            limiter,
            retries: 0,
        }
    }

    /// Retry transient listing failures this many times before giving up
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn filter(&self) -> &UniverseFilter {
        &self.filter
    }

    /// All symbols passing the filter. Either the full filtered set or an error.
    pub async fn fetch(&self) -> Result<Vec<SymbolInfo>, FetchError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(200))
            .with_max_times(self.retries);

        let listed = (|| async {
            for _ in 0..self.provider.listing_requests() {
                self.limiter.acquire().await;
            }
            self.provider.list_symbols().await
        })
            .retry(backoff)
            .when(|e: &FetchError| e.is_transient())
            .notify(|e: &FetchError, delay: Duration| {
                warn!(
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "SymbolUniverse: listing failed, retrying"
                );
            })
            .await?;

        let total = listed.len();
        let symbols: Vec<SymbolInfo> = listed
            .into_iter()
            .filter(|s| self.filter.accepts(s))
            .collect();

        info!(
            listed = total,
            eligible = symbols.len(),
            quote = %self.filter.quote_asset,
            "SymbolUniverse: {} of {} symbols eligible",
            symbols.len(),
            total
        );
        Ok(symbols)
    }
}
