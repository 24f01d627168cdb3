//! Sink that forwards trace records into the process log.

use tracing::{debug, error, info, warn};

use crate::domain::models::{TraceLevel, TraceRecord};
use crate::domain::ports::TraceSink;

/// Sink that re-emits trace lines as `tracing` events.
///
/// Events use the `agent_trace::channel` target and carry the channel name
/// and trace level as fields, so the subscriber installed by
/// [`LoggerImpl`](crate::infrastructure::logging::LoggerImpl) decides the
/// final format (JSON or pretty, stdout or rolling file).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    /// Create the sink.
    pub const fn new() -> Self {
        Self
    }
}

impl TraceSink for TracingSink {
    fn write(&self, record: &TraceRecord<'_>) {
        let channel = record.channel;
        let level = record.level.as_str();
        let message = record.message;

        match record.level {
            TraceLevel::Off => {}
            TraceLevel::Critical | TraceLevel::Error => {
                error!(target: "agent_trace::channel", channel, level, "{message}");
            }
            TraceLevel::Warning => {
                warn!(target: "agent_trace::channel", channel, level, "{message}");
            }
            TraceLevel::Info => {
                info!(target: "agent_trace::channel", channel, level, "{message}");
            }
            TraceLevel::Verbose => {
                debug!(target: "agent_trace::channel", channel, level, "{message}");
            }
        }
    }
}
