use serde::{Deserialize, Serialize};

/// A tradable instrument as listed by the upstream exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub quote_asset: String,
    pub status: String,
    /// `None` when the upstream had no 24h ticker for the symbol
    pub last_price: Option<f64>,
    pub quote_volume: Option<f64>,
}

impl SymbolInfo {
    pub fn new(symbol: impl Into<String>, quote_asset: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            quote_asset: quote_asset.into(),
            status: "TRADING".to_string(),
            last_price: None,
            quote_volume: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_ticker(mut self, last_price: f64, quote_volume: f64) -> Self {
        self.last_price = Some(last_price);
        self.quote_volume = Some(quote_volume);
        self
    }

    pub fn is_trading(&self) -> bool {
        self.status == "TRADING"
    }
}
