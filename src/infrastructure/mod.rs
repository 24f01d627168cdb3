//! Infrastructure layer module
//!
//! This module contains the adapters and external integrations:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing-subscriber)
//! - Secret masking
//! - Trace sinks
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod masking;
pub mod sinks;
