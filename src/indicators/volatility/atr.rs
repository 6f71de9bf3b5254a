//! ATR (Average True Range) indicator
//!
//! The first bar's true range is its high-low span. The average is seeded with
//! the mean of the first `period` true ranges, then Wilder-smoothed:
//! `ATR = (prev * (N - 1) + TR) / N`.

use crate::common::math;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    prev_close: Option<f64>,
    count: usize,
    sum: f64,
    value: Option<f64>,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            prev_close: None,
            count: 0,
            sum: 0.0,
            value: None,
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64) -> Option<f64> {
        let tr = match self.prev_close.replace(close) {
            Some(prev) => math::true_range(high, low, prev),
            None => high - low,
        };
        self.count += 1;

        let n = self.period as f64;
        self.value = match self.value {
            Some(prev) => Some((prev * (n - 1.0) + tr) / n),
            None => {
                self.sum += tr;
                (self.count >= self.period).then(|| self.sum / n)
            }
        };
        self.value
    }
}
