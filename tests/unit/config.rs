//! Unit tests for environment configuration

use std::collections::HashMap;

use falcon::config::Config;
use falcon::error::ConfigError;
use falcon::models::StrategyKind;
use tokio_test::{assert_err, assert_ok};

fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = assert_ok!(load(&[]));
    assert_eq!(config, Config::default());
    assert_eq!(config.port, 10000);
    assert_eq!(config.klines_limit, 120);
    assert_eq!(config.strategy.primary_interval, "1h");
    assert_eq!(config.strategies, vec![StrategyKind::TrendLevel]);
    assert_eq!(config.universe.quote_asset, "USDT");
    assert!(config.telegram.is_none());
    assert!(!config.is_production());
}

#[test]
fn test_overrides() {
    let config = assert_ok!(load(&[
        ("APP_ENV", "production"),
        ("PORT", "8080"),
        ("QUOTE_ASSET", "btc"),
        ("MAX_PRICE", "0.5"),
        ("MIN_QUOTE_VOLUME", "100000"),
        ("CANDLE_INTERVAL", "15m"),
        ("STRATEGIES", "trend_level, kdj-cross,liquidity_momentum"),
        ("SUPPORT_LEVELS", "1.0, 2.0"),
        ("STRICT_TREND", "true"),
        ("SCAN_INTERVAL_SECONDS", "0"),
        ("REQUESTS_PER_SECOND", "5"),
    ]));
    assert!(config.is_production());
    assert_eq!(config.port, 8080);
    assert_eq!(config.universe.quote_asset, "BTC");
    assert_eq!(config.universe.max_price, Some(0.5));
    assert_eq!(config.universe.min_quote_volume, Some(100000.0));
    assert_eq!(config.strategy.primary_interval, "15m");
    assert_eq!(
        config.strategies,
        vec![
            StrategyKind::TrendLevel,
            StrategyKind::KdjCross,
            StrategyKind::LiquidityMomentum
        ]
    );
    assert_eq!(config.strategy.levels.supports, vec![1.0, 2.0]);
    assert!(config.strategy.strict_trend);
    assert_eq!(config.scan_interval_seconds, 0);
    assert_eq!(config.rate_limit_burst, 5);
}

#[test]
fn test_blank_values_use_defaults() {
    let config = assert_ok!(load(&[("PORT", "  "), ("MAX_PRICE", "")]));
    assert_eq!(config.port, 10000);
    assert_eq!(config.universe.max_price, None);
}

#[test]
fn test_telegram_needs_token_and_chat() {
    let config = assert_ok!(load(&[("TELEGRAM_TOKEN", "123:abc")]));
    assert!(config.telegram.is_none());

    let config = assert_ok!(load(&[("TELEGRAM_TOKEN", "123:abc"), ("TELEGRAM_CHAT_ID", "-100")]));
    let telegram = config.telegram.unwrap();
    assert_eq!(telegram.chat_id, "-100");
    assert_eq!(telegram.base_url, "https://api.telegram.org");
}

#[test]
fn test_rejects_unknown_interval() {
    let err = assert_err!(load(&[("CANDLE_INTERVAL", "7m")]));
    assert!(matches!(err, ConfigError::Invalid { key: "CANDLE_INTERVAL", .. }));
}

#[test]
fn test_rejects_unknown_strategy() {
    let err = assert_err!(load(&[("STRATEGIES", "trend_level,moon")]));
    assert!(err.to_string().contains("unknown strategy"));
}

#[test]
fn test_rejects_out_of_range_values() {
    assert_err!(load(&[("KLINES_LIMIT", "500")]));
    assert_err!(load(&[("KLINES_LIMIT", "10")]));
    assert_err!(load(&[("LEVEL_TOLERANCE", "0")]));
    assert_err!(load(&[("REQUESTS_PER_SECOND", "0")]));
    assert_err!(load(&[("PORT", "not-a-port")]));
    assert_err!(load(&[("BINANCE_BASE_URL", "not a url")]));
}
