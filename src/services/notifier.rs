//! Signal delivery to an external channel.
//!
//! Delivery is fire-and-forget: failures are logged and counted, never
//! retried, and never change the outcome of the cycle that produced them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::error::DeliveryError;
use crate::metrics::Metrics;
use crate::models::ScanCycle;
use crate::signals::format::{render_failure, render_signal, render_summary};

pub const TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

/// Plain text or rich markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    Plain,
    Html,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str, format: MessageFormat) -> Result<(), DeliveryError>;

    /// Format this channel renders best
    fn preferred_format(&self) -> MessageFormat {
        MessageFormat::Plain
    }
}

/// Telegram Bot API `sendMessage`
pub struct TelegramNotifier {
    http: reqwest::Client,
    endpoint: Url,
    chat_id: String,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(
        base_url: &str,
        token: &str,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Self::with_client(base_url, token, chat_id, http)
    }

    pub fn with_client(
        base_url: &str,
        token: &str,
        chat_id: impl Into<String>,
        http: reqwest::Client,
    ) -> Result<Self, DeliveryError> {
        // tokens contain ':' so they cannot go through Url::join
        let endpoint = Url::parse(&format!(
            "{}/bot{}/sendMessage",
            base_url.trim_end_matches('/'),
            token
        ))
        .map_err(|e| DeliveryError::Transport(format!("invalid telegram url: {}", e)))?;
        Ok(Self {
            http,
            endpoint,
            chat_id: chat_id.into(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str, format: MessageFormat) -> Result<(), DeliveryError> {
        let mut payload = json!({
            "chat_id": self.chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });
        if format == MessageFormat::Html {
            payload["parse_mode"] = json!("HTML");
        }

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let body: Option<TelegramResponse> = response.json().await.ok();

        match body {
            Some(body) if body.ok => Ok(()),
            Some(body) => Err(DeliveryError::Rejected(
                body.description
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            )),
            None if status.is_success() => Ok(()),
            None => Err(DeliveryError::Http {
                status: status.as_u16(),
            }),
        }
    }

    fn preferred_format(&self) -> MessageFormat {
        MessageFormat::Html
    }
}

/// Writes messages to the log; used when no chat channel is configured
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, text: &str, _format: MessageFormat) -> Result<(), DeliveryError> {
        info!(message = %text, "LogNotifier: signal");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

pub struct SignalDispatcher {
    notifier: Arc<dyn Notifier>,
    metrics: Option<Arc<Metrics>>,
}

impl SignalDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Deliver one message; failure is logged and reported as `false`
    pub async fn send(&self, text: &str) -> bool {
        let format = self.notifier.preferred_format();
        match self.notifier.deliver(text, format).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "SignalDispatcher: delivery failed");
                if let Some(ref metrics) = self.metrics {
                    metrics.notifications_failed_total.inc();
                }
                false
            }
        }
    }

    /// Summary header followed by one message per signal, in discovery order.
    ///
    /// With no signals the summary is only sent when `announce_empty` is set.
    pub async fn dispatch(&self, cycle: &ScanCycle, announce_empty: bool) -> DispatchReport {
        let mut report = DispatchReport::default();
        if cycle.signals.is_empty() && !announce_empty {
            return report;
        }

        let format = self.notifier.preferred_format();
        let messages = std::iter::once(render_summary(cycle, format))
            .chain(cycle.signals.iter().map(|s| render_signal(s, format)));
        for message in messages {
            if self.send(&message).await {
                report.delivered += 1;
            } else {
                report.failed += 1;
            }
        }
        report
    }

    pub async fn dispatch_failure(&self, error: &str) -> bool {
        let text = render_failure(error, self.notifier.preferred_format());
        self.send(&text).await
    }
}
