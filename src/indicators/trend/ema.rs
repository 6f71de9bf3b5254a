//! EMA (Exponential Moving Average) indicator

use crate::models::indicators::IndicatorSnapshot;

/// Streaming EMA seeded with the arithmetic mean of the first `period` values.
///
/// Afterwards `ema = value * k + prev * (1 - k)` with `k = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    k: f64,
    count: usize,
    seed_sum: f64,
    value: Option<f64>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        let period = period.max(1);
        Self {
            period,
            k: 2.0 / (period as f64 + 1.0),
            count: 0,
            seed_sum: 0.0,
            value: None,
        }
    }

    pub fn update(&mut self, value: f64) -> Option<f64> {
        self.count += 1;
        match self.value {
            Some(prev) => {
                self.value = Some(value * self.k + prev * (1.0 - self.k));
            }
            None => {
                self.seed_sum += value;
                if self.count >= self.period {
                    self.value = Some(self.seed_sum / self.period as f64);
                }
            }
        }
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// Price above the fast and mid EMAs; `strict` additionally requires
/// `close > fast > mid > slow`.
pub fn is_uptrend(snapshot: &IndicatorSnapshot, strict: bool) -> bool {
    let basic = snapshot.close > snapshot.ema_fast && snapshot.close > snapshot.ema_mid;
    if strict {
        basic && snapshot.ema_fast > snapshot.ema_mid && snapshot.ema_mid > snapshot.ema_slow
    } else {
        basic
    }
}
