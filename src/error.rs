//! Error taxonomy for the scanning engine.
//!
//! Per-symbol failures ([`FetchError`]) never escape a single symbol's scan,
//! while [`ScanError`] describes failures of the cycle as a whole.

use thiserror::Error;

/// Failure of one upstream market-data call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },
    #[error("rate limited by upstream")]
    RateLimited,
    #[error("unknown symbol {0}")]
    UnknownSymbol(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Timeouts, server errors, rate-limit rejections and transport failures
    /// may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::RateLimited | FetchError::Transport(_) => true,
            FetchError::Http { status } => *status >= 500,
            FetchError::UnknownSymbol(_) | FetchError::Malformed(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Http {
                status: status.as_u16(),
            }
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Cycle-level failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScanError {
    #[error("symbol universe unavailable: {0}")]
    Universe(FetchError),
    #[error("a scan cycle is already in progress")]
    CycleInProgress,
}

/// Failure to hand a message to the notification channel.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("notification transport error: {0}")]
    Transport(String),
    #[error("notification endpoint returned HTTP {status}")]
    Http { status: u16 },
    #[error("notification rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => DeliveryError::Http {
                status: status.as_u16(),
            },
            None => DeliveryError::Transport(err.to_string()),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
