//! Momentum indicators: RSI, StochRSI, KDJ

pub mod kdj;
pub mod rsi;
pub mod stoch_rsi;

pub use kdj::*;
pub use rsi::*;
pub use stoch_rsi::*;
