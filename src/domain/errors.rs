//! Domain errors for agent tracing.

use thiserror::Error;

/// Configuration errors raised while building a verbosity setting or
/// validating loaded configuration.
///
/// These are the only errors a caller of the trace API can observe, and
/// only at construction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A level string that names no trace level.
    #[error("Invalid trace level: {0}. Must be one of: off, critical, error, warning, info, verbose")]
    InvalidTraceLevel(String),

    /// A process log level other than trace, debug, info, warn or error.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// An override with an empty or whitespace-only channel name.
    #[error("Channel override name cannot be empty")]
    EmptyOverrideName,

    /// Two override names that differ only by case.
    #[error("Duplicate channel override '{0}' (override names are case-insensitive)")]
    DuplicateOverride(String),

    /// A trace file path that is present but empty.
    #[error("Trace file path cannot be empty")]
    EmptyTraceFile,

    /// Any other invalid configuration.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors raised by a secret masker.
#[derive(Debug, Error)]
pub enum MaskError {
    /// A pattern that does not compile.
    #[error("Invalid masking pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The rejected pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// The masker's state lock was poisoned.
    #[error("Secret masker state is poisoned")]
    Poisoned,

    /// Masking failed for another reason.
    #[error("Secret masking failed: {0}")]
    Failed(String),
}

/// Errors raised by a trace sink when flushing.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing or flushing failed.
    #[error("Trace sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink's writer lock was poisoned.
    #[error("Trace sink state is poisoned")]
    Poisoned,
}

/// Errors from the strict base64-aware sanitizer entry point.
///
/// Both variants are informational: the lenient `sanitize` treats them as
/// "scrub the text literally".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeError {
    /// The input is not base64.
    #[error("Input is not valid base64")]
    NotBase64,

    /// The decoded payload is not UTF-8 text.
    #[error("Decoded base64 payload is not valid UTF-8")]
    NotUtf8,
}
