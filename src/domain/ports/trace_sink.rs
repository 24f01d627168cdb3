//! Trace sink port and the null sink.

use crate::domain::errors::SinkError;
use crate::domain::models::TraceRecord;

/// Port for the physical destination of trace lines.
///
/// Sinks receive records whose message is already redacted, and own their
/// formatting, buffering and flushing. `write` is fire-and-forget: the core
/// observes no result from it.
pub trait TraceSink: Send + Sync {
    /// Accept one record.
    fn write(&self, record: &TraceRecord<'_>);

    /// Flush buffered output. Called when the owning registry is disposed.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn write(&self, _record: &TraceRecord<'_>) {}
}
