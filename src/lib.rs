//! Falcon: periodic market scanner for spot pairs.
//!
//! Each cycle lists the eligible symbol universe, fetches candles through a
//! shared pacing limiter, computes a typed indicator snapshot per candle and
//! runs the configured strategies. Signals go out through a notifier.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod strategies;
