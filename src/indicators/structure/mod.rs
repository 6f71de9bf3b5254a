//! Market structure: SuperTrend bands and support/resistance levels

pub mod supertrend;
pub mod support_resistance;

pub use supertrend::*;
pub use support_resistance::*;
