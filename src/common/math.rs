//! Numeric helpers shared by the indicator implementations

/// Floor used wherever a denominator may collapse to zero.
pub const EPSILON: f64 = 1e-10;

/// Simple moving average of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// True range of a bar given the previous close
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Relative distance between `price` and `level`, as a fraction of the level.
///
/// Returns `None` for non-positive levels.
pub fn relative_distance(price: f64, level: f64) -> Option<f64> {
    if level <= 0.0 || !level.is_finite() {
        return None;
    }
    Some((price - level).abs() / level)
}

/// Divide, returning `fallback` when the denominator is effectively zero.
pub fn safe_div(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator.abs() < EPSILON {
        fallback
    } else {
        numerator / denominator
    }
}

/// Minimum and maximum of a slice; `None` when empty.
pub fn min_max<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values.into_iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
