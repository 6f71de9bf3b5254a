//! Thin Binance REST client.
//!
//! Constructed once per process and shared; all calls are independent and
//! map failures into [`FetchError`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::messages::{parse_kline, ApiError, ExchangeInfo, Ticker24h, INVALID_SYMBOL_CODE};
use crate::error::FetchError;
use crate::models::Candle;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

#[derive(Debug, Clone)]
pub struct BinanceRestClient {
    base_url: Url,
    http: reqwest::Client,
}

impl BinanceRestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("falcon-scanner")
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Self::with_client(base_url, http)
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::Transport(format!("invalid base url {}: {}", base_url, e)))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn exchange_info(&self) -> Result<ExchangeInfo, FetchError> {
        self.get_json("api/v3/exchangeInfo", &[], None).await
    }

    pub async fn tickers_24h(&self) -> Result<Vec<Ticker24h>, FetchError> {
        self.get_json("api/v3/ticker/24hr", &[], None).await
    }

    pub async fn klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        let query = [
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
            ("limit", limit.to_string()),
        ];
        let rows: Vec<Vec<Value>> = self.get_json("api/v3/klines", &query, Some(symbol)).await?;
        rows.iter().map(|row| parse_kline(row)).collect()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        symbol: Option<&str>,
    ) -> Result<T, FetchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!(url = %url, "Binance GET {}", path);

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body, symbol));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

fn status_error(status: StatusCode, body: &str, symbol: Option<&str>) -> FetchError {
    match status.as_u16() {
        418 | 429 => FetchError::RateLimited,
        400 => match (serde_json::from_str::<ApiError>(body), symbol) {
            (Ok(err), Some(symbol)) if err.code == INVALID_SYMBOL_CODE => {
                FetchError::UnknownSymbol(symbol.to_string())
            }
            _ => FetchError::Http { status: 400 },
        },
        code => FetchError::Http { status: code },
    }
}
