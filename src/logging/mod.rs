//! Logging setup.
//!
//! `APP_ENV=production` (or `prod`) gets one JSON object per line for log
//! aggregation; anything else gets colored text for a terminal.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging(environment: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match environment {
        "production" | "prod" => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_target(true)
                    .with_line_number(true),
            )
            .init(),
        _ => registry
            .with(fmt::layer().with_target(true).with_ansi(true))
            .init(),
    }
}
