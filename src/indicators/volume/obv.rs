//! OBV (On-Balance Volume) with a simple moving average of its own values

use crate::indicators::trend::Sma;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObvValue {
    pub obv: f64,
    pub sma: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Obv {
    prev_close: Option<f64>,
    value: f64,
    sma: Sma,
}

impl Obv {
    pub fn new(sma_period: usize) -> Self {
        Self {
            prev_close: None,
            value: 0.0,
            sma: Sma::new(sma_period),
        }
    }

    pub fn update(&mut self, close: f64, volume: f64) -> ObvValue {
        if let Some(prev) = self.prev_close.replace(close) {
            if close > prev {
                self.value += volume;
            } else if close < prev {
                self.value -= volume;
            }
        }
        ObvValue {
            obv: self.value,
            sma: self.sma.update(self.value),
        }
    }
}
