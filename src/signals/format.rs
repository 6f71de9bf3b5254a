//! Message rendering for delivered signals and cycle summaries

use crate::models::{ScanCycle, SignalDirection, SignalEvent};
use crate::services::notifier::MessageFormat;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn bold(text: &str, format: MessageFormat) -> String {
    match format {
        MessageFormat::Html => format!("<b>{}</b>", escape_html(text)),
        MessageFormat::Plain => text.to_string(),
    }
}

fn body(text: &str, format: MessageFormat) -> String {
    match format {
        MessageFormat::Html => escape_html(text),
        MessageFormat::Plain => text.to_string(),
    }
}

pub fn render_signal(event: &SignalEvent, format: MessageFormat) -> String {
    let headline = match event.direction {
        SignalDirection::Buy => "📈 BUY signal",
        SignalDirection::Sell => "📉 SELL signal",
    };
    let snapshot = &event.snapshot;
    [
        bold(headline, format),
        format!("Symbol: {}", bold(&event.symbol, format)),
        format!("Price: {:.5} ({})", event.price, body(&event.interval, format)),
        format!("Strategy: {}", body(&event.strategy, format)),
        format!(
            "EMA {:.5} / {:.5} / {:.5}",
            snapshot.ema_fast, snapshot.ema_mid, snapshot.ema_slow
        ),
        body(&event.reason, format),
    ]
    .join("\n")
}

pub fn render_summary(cycle: &ScanCycle, format: MessageFormat) -> String {
    if cycle.signals.is_empty() {
        return format!(
            "✅ Scan complete: {} symbols checked, no clear opportunities right now.",
            cycle.scanned
        );
    }
    format!(
        "📊 Scan complete: {} signal(s) across {} symbols ({} skipped, {:.1}s)",
        bold(&cycle.signal_count().to_string(), format),
        cycle.scanned,
        cycle.skipped_count(),
        cycle.elapsed().as_secs_f64()
    )
}

pub fn render_failure(error: &str, format: MessageFormat) -> String {
    format!("⚠️ Scan aborted: {}", body(error, format))
}
