//! External collaborators: market data, pacing, delivery.

pub mod binance;
pub mod fetcher;
pub mod market_data;
pub mod notifier;
pub mod rate_limiter;
pub mod universe;

pub use fetcher::CandleFetcher;
pub use market_data::MarketDataProvider;
pub use notifier::{LogNotifier, MessageFormat, Notifier, SignalDispatcher, TelegramNotifier};
pub use rate_limiter::PacingLimiter;
pub use universe::{SymbolUniverse, UniverseFilter};
