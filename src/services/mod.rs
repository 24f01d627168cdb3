//! Service layer
//!
//! Trace channels and the machinery around them:
//! - VerbosityGate: shared, atomically updated threshold
//! - Channel: gated, masked write path into a sink
//! - ChannelRegistry: lazy, exactly-once channel creation and teardown
//! - log_sanitizer: defuses agent control directives in untrusted text

pub mod channel;
pub mod channel_registry;
pub mod log_sanitizer;
pub mod verbosity_gate;

pub use channel::{Channel, MethodScope, SUPPRESSED_NOTICE};
pub use channel_registry::ChannelRegistry;
pub use log_sanitizer::{decode_base64, sanitize, sanitize_base64, sanitize_opt, DecodedPayload};
pub use verbosity_gate::VerbosityGate;
