//! Stochastic RSI with smoothed %K and %D, on a 0-100 scale

use std::collections::VecDeque;

use crate::common::math::{min_max, safe_div};
use crate::indicators::trend::Sma;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochRsiValue {
    pub k: f64,
    pub d: f64,
}

#[derive(Debug, Clone)]
pub struct StochRsi {
    window: usize,
    history: VecDeque<f64>,
    k: Sma,
    d: Sma,
}

impl StochRsi {
    pub fn new(window: usize, k_smoothing: usize, d_smoothing: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            history: VecDeque::with_capacity(window),
            k: Sma::new(k_smoothing),
            d: Sma::new(d_smoothing),
        }
    }

    /// Feed the next RSI value
    pub fn update(&mut self, rsi: f64) -> Option<StochRsiValue> {
        self.history.push_back(rsi);
        if self.history.len() > self.window {
            self.history.pop_front();
        }
        if self.history.len() < self.window {
            return None;
        }

        let (lowest, highest) = min_max(&self.history)?;
        // flat RSI window
        let ratio = safe_div(rsi - lowest, highest - lowest, 0.0) * 100.0;
        let k = self.k.update(ratio)?;
        let d = self.d.update(k)?;
        Some(StochRsiValue { k, d })
    }
}
