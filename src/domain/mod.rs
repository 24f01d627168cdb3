//! Domain layer for agent tracing
//!
//! This module contains the trace level model, verbosity configuration,
//! error types, and the port traits implemented by infrastructure adapters.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ConfigError, MaskError, SanitizeError, SinkError};
