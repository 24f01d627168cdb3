//! Logging infrastructure
//!
//! Structured logging for the process itself using tracing and tracing-subscriber:
//! - JSON or pretty console output on stderr (stdout is reserved for command output)
//! - Optional rolling JSON log files
//!
//! Trace channel output reaches this subscriber through
//! [`TracingSink`](crate::infrastructure::sinks::TracingSink).

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl};
