//! Proximity and crossing checks against configured support/resistance levels

use crate::common::math::relative_distance;

/// The level closest to `price` whose relative distance is below `tolerance`
pub fn nearest_level(price: f64, levels: &[f64], tolerance: f64) -> Option<f64> {
    levels
        .iter()
        .filter_map(|&level| relative_distance(price, level).map(|d| (level, d)))
        .filter(|(_, distance)| *distance < tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(level, _)| level)
}

/// Previous close strictly below the level and current close strictly above it
pub fn crossed_above(prev_close: f64, close: f64, level: f64) -> bool {
    prev_close < level && close > level
}

/// Among the levels crossed upward between two closes, the one nearest to
/// `close` whose relative distance is below `tolerance`
pub fn breakout_level(prev_close: f64, close: f64, levels: &[f64], tolerance: f64) -> Option<f64> {
    let crossed: Vec<f64> = levels
        .iter()
        .copied()
        .filter(|&level| crossed_above(prev_close, close, level))
        .collect();
    nearest_level(close, &crossed, tolerance)
}
