//! Market data provider interface.
//!
//! The orchestrator only talks to upstream exchanges through this trait, so
//! tests can substitute an in-memory provider.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{Candle, SymbolInfo};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Every listed instrument with its 24h ticker data
    async fn list_symbols(&self) -> Result<Vec<SymbolInfo>, FetchError>;

    /// Upstream requests issued by one `list_symbols` call
    fn listing_requests(&self) -> u32 {
        1
    }

    /// Up to `limit` most recent candles, oldest first
    async fn get_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError>;
}
