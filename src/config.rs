//! Environment-driven configuration.
//!
//! `Config::from_env` reads the process environment (after `.env` has been
//! loaded by the binary); `Config::from_lookup` takes any key lookup.

use std::env;
use std::str::FromStr;
use url::Url;

use crate::error::ConfigError;
use crate::indicators::IndicatorParams;
use crate::models::strategy::{LevelConfig, StrategyConfig, StrategyKind};
use crate::services::binance::client::DEFAULT_BASE_URL;
use crate::services::fetcher::{MAX_LIMIT, MIN_LIMIT};
use crate::services::notifier::TELEGRAM_BASE_URL;
use crate::services::universe::UniverseFilter;

/// Interval strings accepted by the upstream
pub const VALID_INTERVALS: &[&str] = &[
    "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "6h", "8h", "12h", "1d", "3d", "1w", "1M",
];

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub binance_base_url: String,
    pub request_timeout_seconds: u64,
    pub universe: UniverseFilter,
    pub klines_limit: usize,
    pub strategies: Vec<StrategyKind>,
    pub strategy: StrategyConfig,
    pub indicators: IndicatorParams,
    pub scan_interval_seconds: u64,
    pub workers: usize,
    pub requests_per_second: u32,
    pub rate_limit_burst: u32,
    pub universe_retries: usize,
    pub telegram: Option<TelegramConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 10000,
            binance_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_seconds: 10,
            universe: UniverseFilter::default(),
            klines_limit: 120,
            strategies: vec![StrategyKind::TrendLevel],
            strategy: StrategyConfig::default(),
            indicators: IndicatorParams::default(),
            scan_interval_seconds: 900,
            workers: 4,
            requests_per_second: 10,
            rate_limit_burst: 10,
            universe_retries: 2,
            telegram: None,
        }
    }
}

struct Reader<F> {
    lookup: F,
}

impl<F> Reader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.raw(key) {
            Some(value) => value
                .parse()
                .map_err(|e: T::Err| ConfigError::invalid(key, &value, e.to_string())),
            None => Ok(default),
        }
    }

    fn optional<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.raw(key)
            .map(|value| {
                value
                    .parse()
                    .map_err(|e: T::Err| ConfigError::invalid(key, &value, e.to_string()))
            })
            .transpose()
    }

    fn list<T>(&self, key: &'static str, default: Vec<T>) -> Result<Vec<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(value) = self.raw(key) else {
            return Ok(default);
        };
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                item.parse()
                    .map_err(|e: T::Err| ConfigError::invalid(key, &value, e.to_string()))
            })
            .collect()
    }

    fn interval(&self, key: &'static str, default: &str) -> Result<String, ConfigError> {
        let value = self.raw(key).unwrap_or_else(|| default.to_string());
        if VALID_INTERVALS.contains(&value.as_str()) {
            Ok(value)
        } else {
            Err(ConfigError::invalid(key, &value, "unsupported interval"))
        }
    }

    fn url(&self, key: &'static str, default: &str) -> Result<String, ConfigError> {
        let value = self.raw(key).unwrap_or_else(|| default.to_string());
        Url::parse(&value).map_err(|e| ConfigError::invalid(key, &value, e.to_string()))?;
        Ok(value.trim_end_matches('/').to_string())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let r = Reader { lookup };
        let defaults = Config::default();
        let level_defaults = LevelConfig::default();
        let strategy_defaults = StrategyConfig::default();

        let tolerance: f64 = r.parse("LEVEL_TOLERANCE", level_defaults.tolerance)?;
        if !(tolerance > 0.0 && tolerance < 1.0) {
            return Err(ConfigError::invalid(
                "LEVEL_TOLERANCE",
                &tolerance.to_string(),
                "must be between 0 and 1",
            ));
        }

        let klines_limit: usize = r.parse("KLINES_LIMIT", defaults.klines_limit)?;
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&klines_limit) {
            return Err(ConfigError::invalid(
                "KLINES_LIMIT",
                &klines_limit.to_string(),
                format!("must be within {}..={}", MIN_LIMIT, MAX_LIMIT),
            ));
        }

        let strategies: Vec<StrategyKind> = r.list("STRATEGIES", defaults.strategies.clone())?;
        if strategies.is_empty() {
            return Err(ConfigError::invalid("STRATEGIES", "", "no strategy selected"));
        }

        let requests_per_second: u32 =
            r.parse("REQUESTS_PER_SECOND", defaults.requests_per_second)?;
        if requests_per_second == 0 {
            return Err(ConfigError::invalid("REQUESTS_PER_SECOND", "0", "must be positive"));
        }

        let telegram = match (r.raw("TELEGRAM_TOKEN"), r.raw("TELEGRAM_CHAT_ID")) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig {
                token,
                chat_id,
                base_url: r.url("TELEGRAM_BASE_URL", TELEGRAM_BASE_URL)?,
            }),
            _ => None,
        };

        Ok(Self {
            environment: r.raw("APP_ENV").unwrap_or(defaults.environment),
            port: r.parse("PORT", defaults.port)?,
            binance_base_url: r.url("BINANCE_BASE_URL", DEFAULT_BASE_URL)?,
            request_timeout_seconds: r
                .parse("REQUEST_TIMEOUT_SECONDS", defaults.request_timeout_seconds)?
                .max(1),
            universe: UniverseFilter {
                quote_asset: r
                    .raw("QUOTE_ASSET")
                    .map(|q| q.to_ascii_uppercase())
                    .unwrap_or(defaults.universe.quote_asset),
                max_price: r.optional("MAX_PRICE")?,
                min_quote_volume: r.optional("MIN_QUOTE_VOLUME")?,
            },
            klines_limit,
            strategies,
            strategy: StrategyConfig {
                primary_interval: r
                    .interval("CANDLE_INTERVAL", &strategy_defaults.primary_interval)?,
                confirm_interval: r
                    .interval("CONFIRM_INTERVAL", &strategy_defaults.confirm_interval)?,
                levels: LevelConfig {
                    supports: r.list("SUPPORT_LEVELS", level_defaults.supports)?,
                    resistances: r.list("RESISTANCE_LEVELS", level_defaults.resistances)?,
                    tolerance,
                },
                strict_trend: r.parse("STRICT_TREND", strategy_defaults.strict_trend)?,
                stoch_rsi_threshold: r
                    .parse("STOCH_RSI_THRESHOLD", strategy_defaults.stoch_rsi_threshold)?,
            },
            indicators: defaults.indicators,
            scan_interval_seconds: r
                .parse("SCAN_INTERVAL_SECONDS", defaults.scan_interval_seconds)?,
            workers: r.parse("SCAN_WORKERS", defaults.workers)?.max(1),
            requests_per_second,
            rate_limit_burst: r.parse("RATE_LIMIT_BURST", requests_per_second)?.max(1),
            universe_retries: r.parse("UNIVERSE_RETRIES", defaults.universe_retries)?,
            telegram,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}
