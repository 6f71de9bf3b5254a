//! SuperTrend indicator
//!
//! Bands are `hl2 ± multiplier * ATR`. Final bands trail: the upper band only
//! moves down (and the lower band only up) unless the previous close broke
//! through it. Direction turns bearish when the close falls below the previous
//! final lower band and bullish when it rises above the previous final upper
//! band, so the value at each bar depends on the whole history before it.

use crate::indicators::volatility::Atr;
use crate::models::indicators::SuperTrendDirection;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperTrendValue {
    pub value: f64,
    pub direction: SuperTrendDirection,
    pub upper_band: f64,
    pub lower_band: f64,
}

#[derive(Debug, Clone, Copy)]
struct Bands {
    upper: f64,
    lower: f64,
    direction: SuperTrendDirection,
}

#[derive(Debug, Clone)]
pub struct SuperTrend {
    atr: Atr,
    multiplier: f64,
    prev_close: Option<f64>,
    bands: Option<Bands>,
}

impl SuperTrend {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            atr: Atr::new(period),
            multiplier,
            prev_close: None,
            bands: None,
        }
    }

    pub fn update(&mut self, high: f64, low: f64, close: f64) -> Option<SuperTrendValue> {
        let atr = self.atr.update(high, low, close);
        let prev_close = self.prev_close.replace(close);
        let atr = atr?;

        let hl2 = (high + low) / 2.0;
        let basic_upper = hl2 + self.multiplier * atr;
        let basic_lower = hl2 - self.multiplier * atr;

        let bands = match (self.bands, prev_close) {
            (Some(prev), Some(prev_close)) => {
                let upper = if basic_upper < prev.upper || prev_close > prev.upper {
                    basic_upper
                } else {
                    prev.upper
                };
                let lower = if basic_lower > prev.lower || prev_close < prev.lower {
                    basic_lower
                } else {
                    prev.lower
                };
                let direction = match prev.direction {
                    SuperTrendDirection::Bullish if close < prev.lower => {
                        SuperTrendDirection::Bearish
                    }
                    SuperTrendDirection::Bearish if close > prev.upper => {
                        SuperTrendDirection::Bullish
                    }
                    unchanged => unchanged,
                };
                Bands {
                    upper,
                    lower,
                    direction,
                }
            }
            _ => Bands {
                upper: basic_upper,
                lower: basic_lower,
                direction: SuperTrendDirection::Bullish,
            },
        };
        self.bands = Some(bands);

        let value = match bands.direction {
            SuperTrendDirection::Bullish => bands.lower,
            SuperTrendDirection::Bearish => bands.upper,
        };
        Some(SuperTrendValue {
            value,
            direction: bands.direction,
            upper_band: bands.upper,
            lower_band: bands.lower,
        })
    }
}
