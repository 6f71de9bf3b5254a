//! Volatility indicators: ATR

pub mod atr;

pub use atr::*;
