//! [`MarketDataProvider`] backed by the Binance REST API

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::client::BinanceRestClient;
use crate::error::FetchError;
use crate::models::{Candle, SymbolInfo};
use crate::services::market_data::MarketDataProvider;

pub struct BinanceMarketDataProvider {
    client: Arc<BinanceRestClient>,
}

impl BinanceMarketDataProvider {
    pub fn new(client: Arc<BinanceRestClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<BinanceRestClient> {
        &self.client
    }
}

#[async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    async fn list_symbols(&self) -> Result<Vec<SymbolInfo>, FetchError> {
        let (info, tickers) =
            tokio::try_join!(self.client.exchange_info(), self.client.tickers_24h())?;

        let tickers: HashMap<String, _> = tickers
            .into_iter()
            .map(|t| (t.symbol.clone(), t))
            .collect();

        Ok(info
            .symbols
            .into_iter()
            .map(|s| {
                let ticker = tickers.get(&s.symbol);
                SymbolInfo {
                    last_price: ticker.and_then(|t| t.last_price()),
                    quote_volume: ticker.and_then(|t| t.quote_volume()),
                    symbol: s.symbol,
                    quote_asset: s.quote_asset,
                    status: s.status,
                }
            })
            .collect())
    }

    // exchangeInfo + ticker/24hr
    fn listing_requests(&self) -> u32 {
        2
    }

    async fn get_candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        self.client.klines(symbol, interval, limit).await
    }
}
