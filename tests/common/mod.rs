//! Common test utilities for integration tests
//!
//! Provides recording sinks and misbehaving maskers/sinks shared across
//! multiple integration test files.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use agent_trace::domain::errors::MaskError;
use agent_trace::domain::ports::{SecretMasker, TraceSink, ValueEncoder};
use agent_trace::{ChannelRegistry, RegexSecretMasker, TraceLevel, TraceRecord, VerbositySetting};

/// Owned copy of a record seen by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub channel: String,
    pub level: TraceLevel,
    pub message: String,
}

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Captured>>,
    flushes: Mutex<usize>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<Captured> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

impl TraceSink for RecordingSink {
    fn write(&self, record: &TraceRecord<'_>) {
        self.records.lock().unwrap().push(Captured {
            channel: record.channel.to_string(),
            level: record.level,
            message: record.message.to_string(),
        });
    }

    fn flush(&self) -> Result<(), agent_trace::domain::errors::SinkError> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}

/// Masker whose `mask` always fails.
pub struct FailingMasker;

impl SecretMasker for FailingMasker {
    fn mask(&self, _input: &str) -> Result<String, MaskError> {
        Err(MaskError::Failed("masker offline".to_string()))
    }
    fn add_value(&self, _value: &str, _origin: &str) {}
    fn add_pattern(&self, _pattern: &str, _origin: &str) -> Result<(), MaskError> {
        Ok(())
    }
    fn add_encoder(&self, _encoder: ValueEncoder, _origin: &str) {}
}

/// Masker whose `mask` panics.
pub struct PanickingMasker;

impl SecretMasker for PanickingMasker {
    fn mask(&self, _input: &str) -> Result<String, MaskError> {
        panic!("masker exploded");
    }
    fn add_value(&self, _value: &str, _origin: &str) {}
    fn add_pattern(&self, _pattern: &str, _origin: &str) -> Result<(), MaskError> {
        Ok(())
    }
    fn add_encoder(&self, _encoder: ValueEncoder, _origin: &str) {}
}

/// Sink whose `write` and `flush` panic.
pub struct PanickingSink;

impl TraceSink for PanickingSink {
    fn write(&self, _record: &TraceRecord<'_>) {
        panic!("sink exploded");
    }

    fn flush(&self) -> Result<(), agent_trace::domain::errors::SinkError> {
        panic!("flush exploded");
    }
}

/// Registry over a fresh recording sink and a masker that knows `secrets`.
pub fn recording_registry(
    setting: VerbositySetting,
    secrets: &[&str],
) -> (ChannelRegistry, Arc<RecordingSink>) {
    let masker = RegexSecretMasker::new();
    for secret in secrets {
        masker.add_value(secret, "test");
    }
    let sink = Arc::new(RecordingSink::default());
    let registry = ChannelRegistry::new(
        setting,
        Arc::new(masker),
        Arc::clone(&sink) as Arc<dyn TraceSink>,
    );
    (registry, sink)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Convenience: a setting with a default level and overrides.
pub fn setting(default: TraceLevel, overrides: &[(&str, TraceLevel)]) -> VerbositySetting {
    VerbositySetting::new(default, overrides.iter().copied()).unwrap()
}
