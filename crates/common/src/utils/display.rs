//! Presentation helpers for rendering chat messages as text.

use chrono::{DateTime, Utc};

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(timestamp: DateTime<Utc>, fmt: &str) -> String {
    timestamp.format(fmt).to_string()
}

/// Render one message line as `[<timestamp>] <sender>: <content>`.
pub fn render_message(sender: &str, content: &str, timestamp: DateTime<Utc>, fmt: &str) -> String {
    format!("[{}] {}: {}", format_timestamp(timestamp, fmt), sender, content)
}
