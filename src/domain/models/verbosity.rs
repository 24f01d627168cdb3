//! Default level and per-channel overrides.

use std::collections::HashMap;

use crate::domain::errors::ConfigError;
use crate::domain::models::TraceLevel;

/// Immutable verbosity configuration for a channel registry.
///
/// Holds the default trace level and per-channel overrides. Override names
/// are matched case-insensitively; they are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerbositySetting {
    default_level: TraceLevel,
    overrides: HashMap<String, TraceLevel>,
}

impl VerbositySetting {
    /// Build a setting from a default level and per-channel overrides.
    ///
    /// # Errors
    /// Returns [`ConfigError::EmptyOverrideName`] for an empty (or
    /// whitespace-only) name and [`ConfigError::DuplicateOverride`] when two
    /// names differ only by case.
    pub fn new<I, K>(default_level: TraceLevel, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, TraceLevel)>,
        K: AsRef<str>,
    {
        let mut normalized = HashMap::new();
        for (name, level) in overrides {
            let name = name.as_ref();
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyOverrideName);
            }
            if normalized.insert(normalize_name(name), level).is_some() {
                return Err(ConfigError::DuplicateOverride(name.to_string()));
            }
        }

        Ok(Self {
            default_level,
            overrides: normalized,
        })
    }

    /// A setting with only a default level.
    pub fn with_default(default_level: TraceLevel) -> Self {
        Self {
            default_level,
            overrides: HashMap::new(),
        }
    }

    /// Level used by channels without an override.
    pub const fn default_level(&self) -> TraceLevel {
        self.default_level
    }

    /// Case-insensitive override lookup.
    pub fn override_for(&self, name: &str) -> Option<TraceLevel> {
        self.overrides.get(&normalize_name(name)).copied()
    }

    /// Overrides keyed by lower-cased channel name.
    pub fn overrides(&self) -> &HashMap<String, TraceLevel> {
        &self.overrides
    }
}

/// Case-folding used for channel names and override keys.
pub(crate) fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}
