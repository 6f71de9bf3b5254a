//! Binance REST payloads

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::models::Candle;

/// Binance error code for an unknown symbol
pub const INVALID_SYMBOL_CODE: i64 = -1121;

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<ExchangeSymbol>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSymbol {
    pub symbol: String,
    pub status: String,
    pub quote_asset: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub last_price: String,
    pub quote_volume: String,
}

impl Ticker24h {
    pub fn last_price(&self) -> Option<f64> {
        self.last_price.parse().ok()
    }

    pub fn quote_volume(&self) -> Option<f64> {
        self.quote_volume.parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub msg: String,
}

fn field_f64(row: &[Value], index: usize, name: &str) -> Result<f64, FetchError> {
    let value = row
        .get(index)
        .ok_or_else(|| FetchError::Malformed(format!("kline missing {}", name)))?;
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| FetchError::Malformed(format!("kline {} is not a number: {}", name, value)))
}

fn field_time(row: &[Value], index: usize, name: &str) -> Result<DateTime<Utc>, FetchError> {
    row.get(index)
        .and_then(Value::as_i64)
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| FetchError::Malformed(format!("kline {} is not a timestamp", name)))
}

/// Decode one `[openTime, open, high, low, close, volume, closeTime, ...]` row
pub fn parse_kline(row: &[Value]) -> Result<Candle, FetchError> {
    if row.len() < 7 {
        return Err(FetchError::Malformed(format!(
            "kline has {} fields, expected at least 7",
            row.len()
        )));
    }
    let open_time = field_time(row, 0, "open time")?;
    let close_time = field_time(row, 6, "close time")?;
    Ok(Candle::new(
        field_f64(row, 1, "open")?,
        field_f64(row, 2, "high")?,
        field_f64(row, 3, "low")?,
        field_f64(row, 4, "close")?,
        field_f64(row, 5, "volume")?,
        open_time,
    )
    .with_close_time(close_time))
}
