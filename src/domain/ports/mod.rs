//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that infrastructure adapters implement:
//! - SecretMasker: redacts registered secrets from trace text
//! - TraceSink: the destination formatted, redacted trace lines are written to
//!
//! Channels depend only on these traits, never on a concrete masker or sink.

pub mod secret_masker;
pub mod trace_sink;

pub use secret_masker::{SecretMasker, ValueEncoder};
pub use trace_sink::{NullSink, TraceSink};
