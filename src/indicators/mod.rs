//! Technical indicators.
//!
//! Every indicator is a small state machine fed one bar at a time; `update`
//! returns `None` until the indicator has seen enough history to be valid.
//! [`IndicatorPipeline`] folds a whole candle series through all of them.

pub mod pipeline;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use pipeline::*;
