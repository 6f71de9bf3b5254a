//! KDJ oscillator on price.
//!
//! RSV is the close's position inside the `period` high/low range. K and D are
//! recursive smoothings seeded at 50; `J = 3K - 2D`.

use std::collections::VecDeque;

use crate::common::math::{min_max, EPSILON};

const SEED: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KdjValue {
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

/// Where J sits relative to K and D.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdjPosition {
    AboveBoth,
    BelowBoth,
    Between,
}

impl KdjPosition {
    pub fn of(k: f64, d: f64, j: f64) -> Self {
        if j > k && j > d {
            KdjPosition::AboveBoth
        } else if j < k && j < d {
            KdjPosition::BelowBoth
        } else {
            KdjPosition::Between
        }
    }
}

#[derive(Debug, Clone)]
pub struct Kdj {
    period: usize,
    k_smoothing: f64,
    d_smoothing: f64,
    highs: VecDeque<f64>,
    lows: VecDeque<f64>,
    k: f64,
    d: f64,
}

impl Kdj {
    pub fn new(period: usize, k_smoothing: usize, d_smoothing: usize) -> Self {
        let period = period.max(1);
        Self {
            period,
            k_smoothing: k_smoothing.max(1) as f64,
            d_smoothing: d_smoothing.max(1) as f64,
            highs: VecDeque::with_capacity(period),
            lows: VecDeque::with_capacity(period),
            k: SEED,
            d: SEED,
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64) -> Option<KdjValue> {
        self.highs.push_back(high);
        self.lows.push_back(low);
        if self.highs.len() > self.period {
            self.highs.pop_front();
            self.lows.pop_front();
        }
        if self.highs.len() < self.period {
            return None;
        }

        let (_, highest) = min_max(&self.highs)?;
        let (lowest, _) = min_max(&self.lows)?;
        let range = highest - lowest;
        let rsv = if range < EPSILON {
            SEED
        } else {
            (close - lowest) / range * 100.0
        };

        self.k = (self.k * (self.k_smoothing - 1.0) + rsv) / self.k_smoothing;
        self.d = (self.d * (self.d_smoothing - 1.0) + self.k) / self.d_smoothing;

        Some(KdjValue {
            k: self.k,
            d: self.d,
            j: 3.0 * self.k - 2.0 * self.d,
        })
    }
}
