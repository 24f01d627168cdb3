//! Trace severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigError;

/// Trace level used both as a gate threshold and as the level of a write.
///
/// Levels are ordered from quietest (`Off`) to most verbose (`Verbose`).
/// A threshold `T` lets a message at level `L` through when
/// `L != Off && L <= T`.
///
/// # Examples
///
/// ```
/// use agent_trace::domain::models::TraceLevel;
///
/// assert!(TraceLevel::Error < TraceLevel::Info);
/// assert!(TraceLevel::Info.allows(TraceLevel::Warning));
/// assert!(!TraceLevel::Info.allows(TraceLevel::Verbose));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TraceLevel {
    /// Nothing is emitted
    Off = 0,
    /// Unrecoverable failures
    Critical = 1,
    /// Failure conditions
    Error = 2,
    /// Potentially problematic situations
    #[serde(alias = "warn")]
    Warning = 3,
    /// Normal operational messages
    #[default]
    #[serde(alias = "information")]
    Info = 4,
    /// Detailed diagnostics
    #[serde(alias = "debug", alias = "trace")]
    Verbose = 5,
}

impl TraceLevel {
    /// All levels in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Off,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Verbose,
    ];

    /// Returns the string representation of the trace level
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Verbose => "VERBOSE",
        }
    }

    /// Whether a threshold of `self` lets a message at `message_level` through.
    pub fn allows(self, message_level: Self) -> bool {
        message_level != Self::Off && message_level <= self
    }

    pub(crate) const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Off,
            1 => Self::Critical,
            2 => Self::Error,
            3 => Self::Warning,
            4 => Self::Info,
            _ => Self::Verbose,
        }
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraceLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "critical" => Ok(Self::Critical),
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" | "information" => Ok(Self::Info),
            "verbose" | "debug" | "trace" => Ok(Self::Verbose),
            _ => Err(ConfigError::InvalidTraceLevel(s.to_string())),
        }
    }
}
