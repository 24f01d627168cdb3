//! Shared verbosity threshold.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::domain::models::TraceLevel;

/// Mutable threshold that decides whether a trace write is emitted.
///
/// A gate is shared by `Arc` between the registry and every channel that has
/// no per-name override, so changing its level changes all of them at once.
/// The level is a single atomic byte: concurrent readers see either the old
/// or the new level.
#[derive(Debug)]
pub struct VerbosityGate {
    level: AtomicU8,
}

impl VerbosityGate {
    /// Create a gate at `level`.
    pub const fn new(level: TraceLevel) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
        }
    }

    /// Current threshold.
    pub fn level(&self) -> TraceLevel {
        TraceLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Change the threshold; takes effect for every holder of this gate.
    pub fn set_level(&self, level: TraceLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a message at `level` passes this gate.
    #[inline]
    pub fn allows(&self, level: TraceLevel) -> bool {
        self.level().allows(level)
    }
}

impl Default for VerbosityGate {
    fn default() -> Self {
        Self::new(TraceLevel::default())
    }
}
