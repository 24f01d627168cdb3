//! Agent Trace - trace channels for build agents
//!
//! Agent Trace routes an agent's diagnostic output through named,
//! independently leveled trace channels, redacts registered secrets before
//! any line reaches a sink, and defuses agent control directives
//! (`##vso[...]`) that untrusted build output tries to smuggle into logs.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Trace levels, verbosity settings, errors and ports
//! - **Service Layer** (`services`): Channel registry, write path and log sanitizer
//! - **Infrastructure Layer** (`infrastructure`): Config loading, logging, maskers and sinks
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use agent_trace::{ChannelRegistry, RegexSecretMasker, SecretMasker, TraceLevel, VerbositySetting};
//! use agent_trace::domain::ports::NullSink;
//!
//! let masker = Arc::new(RegexSecretMasker::new());
//! masker.add_value("hunter2", "example");
//!
//! let registry = ChannelRegistry::new(
//!     VerbositySetting::with_default(TraceLevel::Info),
//!     masker,
//!     Arc::new(NullSink),
//! );
//! registry.get("JobRunner").info("password is hunter2");
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{Config, TraceConfig, TraceLevel, TraceRecord, VerbositySetting};
pub use domain::ports::{SecretMasker, TraceSink};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::masking::RegexSecretMasker;
pub use infrastructure::sinks::{FileSink, TracingSink};
pub use services::{log_sanitizer, Channel, ChannelRegistry, VerbosityGate};
