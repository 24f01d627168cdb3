//! Named trace channel and its write path.
//!
//! Every write is gated, then masked, then handed to the sink:
//!
//! 1. closed channel or gate rejects the level: return before formatting
//! 2. format the message and pass it through [`SecretMasker::mask`]
//! 3. forward a [`TraceRecord`] to the [`TraceSink`]
//!
//! A write never panics and never returns an error. If the masker fails the
//! line is suppressed: the sink receives [`SUPPRESSED_NOTICE`] instead of the
//! unmasked text.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::models::{TraceLevel, TraceRecord};
use crate::domain::ports::{SecretMasker, TraceSink};
use crate::services::verbosity_gate::VerbosityGate;

/// Replacement text written when the secret masker fails.
pub const SUPPRESSED_NOTICE: &str = "[trace line suppressed: secret masking failed]";

/// A named, independently leveled trace handle.
///
/// Channels are created by [`ChannelRegistry`](crate::services::ChannelRegistry)
/// and shared as `Arc<Channel>`.
pub struct Channel {
    name: String,
    gate: Arc<VerbosityGate>,
    masker: Arc<dyn SecretMasker>,
    sink: Arc<dyn TraceSink>,
    closed: AtomicBool,
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("level", &self.gate.level())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Channel {
    pub(crate) fn new(
        name: impl Into<String>,
        gate: Arc<VerbosityGate>,
        masker: Arc<dyn SecretMasker>,
        sink: Arc<dyn TraceSink>,
    ) -> Self {
        Self {
            name: name.into(),
            gate,
            masker,
            sink,
            closed: AtomicBool::new(false),
        }
    }

    /// Name as spelled by the first lookup.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The gate this channel reads its threshold from.
    ///
    /// Channels without an override share the registry's switch; compare
    /// with `Arc::ptr_eq` to tell them apart.
    pub fn gate(&self) -> &Arc<VerbosityGate> {
        &self.gate
    }

    /// Current threshold of this channel's gate.
    pub fn level(&self) -> TraceLevel {
        self.gate.level()
    }

    /// Whether the owning registry has been disposed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Whether a write at `level` would reach the sink.
    #[inline]
    pub fn is_enabled(&self, level: TraceLevel) -> bool {
        !self.is_closed() && self.gate.allows(level)
    }

    /// Write a message at `level`.
    ///
    /// The message is only formatted when the level is enabled.
    pub fn write(&self, level: TraceLevel, message: impl fmt::Display) {
        if !self.is_enabled(level) {
            return;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.emit(level, &message)));
        if outcome.is_err() {
            error!(channel = %self.name, level = %level, "trace write panicked; line dropped");
        }
    }

    /// Write at [`TraceLevel::Critical`].
    pub fn critical(&self, message: impl fmt::Display) {
        self.write(TraceLevel::Critical, message);
    }

    /// Write at [`TraceLevel::Error`].
    pub fn error(&self, message: impl fmt::Display) {
        self.write(TraceLevel::Error, message);
    }

    /// Write at [`TraceLevel::Warning`].
    pub fn warning(&self, message: impl fmt::Display) {
        self.write(TraceLevel::Warning, message);
    }

    /// Write at [`TraceLevel::Info`].
    pub fn info(&self, message: impl fmt::Display) {
        self.write(TraceLevel::Info, message);
    }

    /// Write at [`TraceLevel::Verbose`].
    pub fn verbose(&self, message: impl fmt::Display) {
        self.write(TraceLevel::Verbose, message);
    }

    /// Write an error and its `source()` chain at Error level.
    pub fn error_detail(&self, err: &(dyn StdError + 'static)) {
        self.write(TraceLevel::Error, ErrorChain(err));
    }

    /// Write `Entering {method}` now and `Leaving {method}` when the
    /// returned scope is dropped, both at Verbose level.
    pub fn entering<'a>(&'a self, method: &'a str) -> MethodScope<'a> {
        self.verbose(format_args!("Entering {method}"));
        MethodScope {
            channel: self,
            method,
        }
    }

    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    fn emit(&self, level: TraceLevel, message: &dyn fmt::Display) {
        let mut text = String::new();
        // A Display impl that reports an error leaves whatever it wrote so far.
        let _ = write!(text, "{message}");

        let masked = self.mask(&text);
        let record = TraceRecord::now(&self.name, level, &masked);
        self.sink.write(&record);
    }

    fn mask<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.masker.mask(text))) {
            Ok(Ok(masked)) => Cow::Owned(masked),
            Ok(Err(err)) => {
                warn!(channel = %self.name, error = %err, "secret masking failed; trace line suppressed");
                Cow::Borrowed(SUPPRESSED_NOTICE)
            }
            Err(_) => {
                warn!(channel = %self.name, "secret masker panicked; trace line suppressed");
                Cow::Borrowed(SUPPRESSED_NOTICE)
            }
        }
    }
}

/// Scope guard returned by [`Channel::entering`].
#[must_use = "the Leaving line is written when the scope is dropped"]
pub struct MethodScope<'a> {
    channel: &'a Channel,
    method: &'a str,
}

impl Drop for MethodScope<'_> {
    fn drop(&mut self) {
        self.channel.verbose(format_args!("Leaving {}", self.method));
    }
}

struct ErrorChain<'a>(&'a (dyn StdError + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(cause) = source {
            write!(f, "\n  caused by: {cause}")?;
            source = cause.source();
        }
        Ok(())
    }
}
