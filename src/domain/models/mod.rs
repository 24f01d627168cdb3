//! Domain models

pub mod config;
pub mod record;
pub mod trace_level;
pub mod verbosity;

pub use config::{Config, LogFormat, LoggingConfig, RotationPolicy, TraceConfig};
pub use record::TraceRecord;
pub use trace_level::TraceLevel;
pub use verbosity::VerbositySetting;
