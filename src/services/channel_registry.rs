//! Channel registry
//!
//! Owns the name-to-channel mapping for one trace setup. Channels are
//! created lazily on first lookup, exactly once per case-insensitive name,
//! and live until the registry is disposed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::domain::errors::ConfigError;
use crate::domain::models::verbosity::normalize_name;
use crate::domain::models::{TraceConfig, TraceLevel, VerbositySetting};
use crate::domain::ports::{SecretMasker, TraceSink};
use crate::services::channel::Channel;
use crate::services::verbosity_gate::VerbosityGate;

/// Registry of named trace channels.
///
/// `get` is safe to call from any number of threads; racing lookups for the
/// same name all receive the one channel that won the insert.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use agent_trace::domain::models::{TraceLevel, VerbositySetting};
/// use agent_trace::domain::ports::NullSink;
/// use agent_trace::infrastructure::masking::RegexSecretMasker;
/// use agent_trace::services::ChannelRegistry;
///
/// let registry = ChannelRegistry::new(
///     VerbositySetting::with_default(TraceLevel::Info),
///     Arc::new(RegexSecretMasker::new()),
///     Arc::new(NullSink),
/// );
///
/// let a = registry.get("JobRunner");
/// let b = registry.get("jobrunner");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct ChannelRegistry {
    channels: RwLock<HashMap<String, Arc<Channel>>>,
    setting: Arc<VerbositySetting>,
    switch: Arc<VerbosityGate>,
    masker: Arc<dyn SecretMasker>,
    sink: Arc<dyn TraceSink>,
    disposed: AtomicBool,
}

impl std::fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelRegistry")
            .field("channels", &self.names())
            .field("default_level", &self.switch.level())
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

impl ChannelRegistry {
    /// Create a registry. The global switch starts at the setting's default level.
    pub fn new(
        setting: VerbositySetting,
        masker: Arc<dyn SecretMasker>,
        sink: Arc<dyn TraceSink>,
    ) -> Self {
        let switch = Arc::new(VerbosityGate::new(setting.default_level()));
        Self {
            channels: RwLock::new(HashMap::new()),
            setting: Arc::new(setting),
            switch,
            masker,
            sink,
            disposed: AtomicBool::new(false),
        }
    }

    /// Create a registry from loaded trace configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the overrides are invalid; no registry
    /// is built in that case.
    pub fn from_config(
        config: &TraceConfig,
        masker: Arc<dyn SecretMasker>,
        sink: Arc<dyn TraceSink>,
    ) -> Result<Self, ConfigError> {
        let setting = VerbositySetting::new(
            config.default_level,
            config.overrides.iter().map(|(name, level)| (name, *level)),
        )?;
        Ok(Self::new(setting, masker, sink))
    }

    /// Look up a channel, creating it on first use.
    ///
    /// Names are case-insensitive; the spelling of the first lookup is the
    /// channel's name. After [`dispose`](Self::dispose) this returns a
    /// detached, closed channel whose writes are no-ops.
    pub fn get(&self, name: &str) -> Arc<Channel> {
        let key = normalize_name(name);

        if self.is_disposed() {
            let channel = self.create_channel(name, &key);
            channel.close();
            return Arc::new(channel);
        }

        {
            let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(channel) = channels.get(&key) {
                return Arc::clone(channel);
            }
        }

        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        // dispose() may have drained the map while we waited for the lock.
        if self.is_disposed() {
            let channel = self.create_channel(name, &key);
            channel.close();
            return Arc::new(channel);
        }
        let channel = channels.entry(key).or_insert_with_key(|key| {
            debug!(channel = %name, "creating trace channel");
            Arc::new(self.create_channel(name, key))
        });
        Arc::clone(channel)
    }

    /// The registry's global gate, shared by every channel without an override.
    pub fn switch(&self) -> &Arc<VerbosityGate> {
        &self.switch
    }

    /// Change the level of every channel that has no per-name override.
    pub fn set_default_level(&self, level: TraceLevel) {
        self.switch.set_level(level);
    }

    /// The setting the registry was built with.
    pub fn setting(&self) -> &VerbositySetting {
        &self.setting
    }

    /// Names of the channels created so far, sorted.
    pub fn names(&self) -> Vec<String> {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = channels.values().map(|c| c.name().to_string()).collect();
        names.sort();
        names
    }

    /// Number of live channels.
    pub fn len(&self) -> usize {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no channel has been created (or all were disposed).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Close every channel, clear the registry and flush the sink.
    ///
    /// Only the first call does anything. Flush failures are logged and
    /// swallowed; teardown always completes.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        let drained: Vec<Arc<Channel>> = {
            let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
            channels.drain().map(|(_, channel)| channel).collect()
        };

        for channel in &drained {
            channel.close();
        }

        let flushed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.sink.flush()));
        match flushed {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(error = %err, "failed to flush trace sink during dispose"),
            Err(_) => warn!("trace sink panicked while flushing during dispose"),
        }

        debug!(channels = drained.len(), "trace channel registry disposed");
    }

    fn create_channel(&self, name: &str, key: &str) -> Channel {
        let gate = self.setting.override_for(key).map_or_else(
            || Arc::clone(&self.switch),
            |level| Arc::new(VerbosityGate::new(level)),
        );

        Channel::new(
            name,
            gate,
            Arc::clone(&self.masker),
            Arc::clone(&self.sink),
        )
    }
}

impl Drop for ChannelRegistry {
    fn drop(&mut self) {
        self.dispose();
    }
}
