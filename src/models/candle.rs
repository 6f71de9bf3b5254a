use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        open_time: DateTime<Utc>,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
            close_time: open_time,
        }
    }

    pub fn with_close_time(mut self, close_time: DateTime<Utc>) -> Self {
        self.close_time = close_time;
        self
    }
}

/// Ordered bars for one symbol and interval.
///
/// Open times are strictly increasing; construction rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    symbol: String,
    interval: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(
        symbol: impl Into<String>,
        interval: impl Into<String>,
        candles: Vec<Candle>,
    ) -> Result<Self, FetchError> {
        let symbol = symbol.into();
        if let Some(pos) = candles
            .windows(2)
            .position(|pair| pair[1].open_time <= pair[0].open_time)
        {
            return Err(FetchError::Malformed(format!(
                "{} candles out of order at index {}",
                symbol,
                pos + 1
            )));
        }
        Ok(Self {
            symbol,
            interval: interval.into(),
            candles,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> &str {
        &self.interval
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }
}
