//! Trace sink adapters
//!
//! Implementations of the `TraceSink` port:
//! - FileSink: host trace listener writing formatted lines to a file
//! - TracingSink: forwards trace lines into the process's tracing subscriber

pub mod file_sink;
pub mod tracing_sink;

pub use file_sink::FileSink;
pub use tracing_sink::TracingSink;
