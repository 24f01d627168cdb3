//! Trace records as delivered to sinks.

use chrono::{DateTime, Utc};

use crate::domain::models::TraceLevel;

/// A single trace line handed to a sink.
///
/// The message has already been through the secret masker. The record
/// borrows from the writing channel; sinks that buffer must copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord<'a> {
    /// When the line was written
    pub timestamp: DateTime<Utc>,
    /// Name of the channel that wrote it
    pub channel: &'a str,
    /// Severity of the line
    pub level: TraceLevel,
    /// The masked message text
    pub message: &'a str,
}

impl<'a> TraceRecord<'a> {
    /// Create a record stamped with the current time.
    pub fn now(channel: &'a str, level: TraceLevel, message: &'a str) -> Self {
        Self {
            timestamp: Utc::now(),
            channel,
            level,
            message,
        }
    }

    /// Host trace listener line format: `[2024-01-01 12:00:00Z INFO Build] message`.
    pub fn to_line(&self) -> String {
        format!(
            "[{} {} {}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%SZ"),
            self.level,
            self.channel,
            self.message
        )
    }
}
