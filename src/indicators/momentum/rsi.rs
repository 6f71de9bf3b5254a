//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss.
//! Averages use Wilder smoothing (`alpha = 1 / period`), seeded with the mean
//! of the first `period` deltas.

use crate::common::math::EPSILON;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_close: Option<f64>,
    deltas: usize,
    gain_sum: f64,
    loss_sum: f64,
    averages: Option<(f64, f64)>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            prev_close: None,
            deltas: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            averages: None,
        }
    }

    pub fn update(&mut self, close: f64) -> Option<f64> {
        let prev = self.prev_close.replace(close)?;
        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        self.deltas += 1;

        match self.averages {
            Some((avg_gain, avg_loss)) => {
                let alpha = 1.0 / self.period as f64;
                self.averages = Some((
                    avg_gain + alpha * (gain - avg_gain),
                    avg_loss + alpha * (loss - avg_loss),
                ));
            }
            None => {
                self.gain_sum += gain;
                self.loss_sum += loss;
                if self.deltas >= self.period {
                    self.averages = Some((
                        self.gain_sum / self.period as f64,
                        self.loss_sum / self.period as f64,
                    ));
                }
            }
        }

        self.averages
            .map(|(avg_gain, avg_loss)| rsi_from_averages(avg_gain, avg_loss))
    }
}

pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = avg_gain / (avg_loss + EPSILON);
    100.0 - 100.0 / (1.0 + rs)
}
