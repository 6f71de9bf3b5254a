//! Shared data models spanning the engine layers.

pub mod candle;
pub mod indicators;
pub mod scan;
pub mod signal;
pub mod strategy;
pub mod symbol;

pub use candle::{Candle, CandleSeries};
pub use indicators::{IndicatorSnapshot, SuperTrendDirection};
pub use scan::{CycleSummary, ScanCycle, SkipReason, SkippedSymbol, TriggerSource};
pub use signal::{SignalDirection, SignalEvent};
pub use strategy::{LevelConfig, StrategyConfig, StrategyKind};
pub use symbol::SymbolInfo;
