//! `trace` command: write captured output through a trace channel.
//!
//! Each stdin line is treated as untrusted process output: optionally
//! sanitized, then written through a registry channel, which masks secrets
//! before the line reaches the sink.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, TraceConfig, TraceLevel};
use crate::domain::ports::{SecretMasker, TraceSink};
use crate::infrastructure::masking::{encoders, RegexSecretMasker};
use crate::infrastructure::sinks::{FileSink, TracingSink};
use crate::services::log_sanitizer::sanitize;
use crate::services::ChannelRegistry;

/// Arguments of the `trace` command.
#[derive(Args, Debug)]
pub struct TraceArgs {
    /// Channel to write through
    #[arg(long, default_value = "Build")]
    pub channel: String,

    /// Level each line is written at
    #[arg(long, default_value = "info")]
    pub level: TraceLevel,

    /// Default channel threshold (overrides configuration)
    #[arg(long)]
    pub threshold: Option<TraceLevel>,

    /// Per-channel threshold as NAME=LEVEL (repeatable)
    #[arg(long = "override", value_parser = parse_override)]
    pub overrides: Vec<(String, TraceLevel)>,

    /// Secret value to mask (repeatable)
    #[arg(long = "secret")]
    pub secrets: Vec<String>,

    /// Trace file to write to (overrides configuration); without one,
    /// lines go to the process log
    #[arg(long)]
    pub trace_file: Option<PathBuf>,

    /// Defuse control directives before writing
    #[arg(long)]
    pub sanitize: bool,
}

/// Summary printed once stdin is exhausted.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct TraceSummaryOutput {
    /// Channel the lines were written through
    pub channel: String,
    /// Level the lines were written at
    pub level: String,
    /// Lines read from stdin
    pub lines_read: usize,
    /// Lines that passed the channel threshold
    pub lines_emitted: usize,
    /// Lines rewritten by sanitizing
    pub directives_defused: usize,
    /// Trace file written to, if any
    pub trace_file: Option<String>,
}

impl CommandOutput for TraceSummaryOutput {
    fn to_human(&self) -> String {
        let mut summary = format!(
            "Traced {} of {} line(s) on channel '{}' at {}",
            self.lines_emitted, self.lines_read, self.channel, self.level
        );
        if self.directives_defused > 0 {
            summary.push_str(&format!(
                "\nDefused {} control directive line(s)",
                self.directives_defused
            ));
        }
        if let Some(ref path) = self.trace_file {
            summary.push_str(&format!("\nTrace file: {path}"));
        }
        summary
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Run the `trace` command.
pub fn execute(args: TraceArgs, config: &Config, json_mode: bool) -> Result<()> {
    let trace_config = effective_trace_config(&config.trace, &args);

    let masker = build_masker(&args.secrets)?;
    let sink: Arc<dyn TraceSink> = match trace_config.trace_file {
        Some(ref path) => Arc::new(FileSink::open(path)?),
        None => Arc::new(TracingSink::new()),
    };

    let registry = ChannelRegistry::from_config(&trace_config, masker, sink)
        .context("invalid trace configuration")?;

    let mut read_error = None;
    let lines = io::stdin()
        .lock()
        .lines()
        .map_while(|line| line.map_err(|err| read_error = Some(err)).ok());

    let mut summary = trace_lines(&registry, &args.channel, args.level, args.sanitize, lines);
    if let Some(err) = read_error {
        registry.dispose();
        return Err(err).context("failed to read stdin");
    }
    summary.trace_file = trace_config
        .trace_file
        .as_ref()
        .map(|p| p.display().to_string());

    registry.dispose();
    output(&summary, json_mode);
    Ok(())
}

/// Write `lines` through `channel` at `level`, sanitizing first when asked.
///
/// Lines are pulled one at a time; each is written before the next is read.
pub fn trace_lines(
    registry: &ChannelRegistry,
    channel: &str,
    level: TraceLevel,
    sanitize_input: bool,
    lines: impl IntoIterator<Item = String>,
) -> TraceSummaryOutput {
    let channel = registry.get(channel);
    let mut summary = TraceSummaryOutput {
        channel: channel.name().to_string(),
        level: level.to_string(),
        ..TraceSummaryOutput::default()
    };

    for line in lines {
        summary.lines_read += 1;

        let line = if sanitize_input {
            let sanitized = sanitize(&line);
            // Sanitizing only rewrites a line when it defuses a marker,
            // plain or inside a base64 payload.
            if sanitized != line {
                summary.directives_defused += 1;
            }
            sanitized
        } else {
            line
        };

        if channel.is_enabled(level) {
            summary.lines_emitted += 1;
        }
        channel.write(level, line);
    }

    summary
}

fn effective_trace_config(base: &TraceConfig, args: &TraceArgs) -> TraceConfig {
    let mut config = base.clone();
    if let Some(threshold) = args.threshold {
        config.default_level = threshold;
    }
    for (name, level) in &args.overrides {
        config.overrides.insert(name.clone(), *level);
    }
    if let Some(ref path) = args.trace_file {
        config.trace_file = Some(path.clone());
    }
    config
}

fn build_masker(secrets: &[String]) -> Result<Arc<dyn SecretMasker>> {
    let masker =
        RegexSecretMasker::with_default_patterns().context("failed to build secret masker")?;
    masker.add_encoder(encoders::json_string_escape, "cli");
    masker.add_encoder(encoders::uri_data_escape, "cli");
    masker.add_encoder(encoders::backslash_escape, "cli");
    masker.add_encoder(encoders::base64_encode, "cli");
    for secret in secrets {
        masker.add_value(secret, "cli");
    }
    Ok(Arc::new(masker))
}

fn parse_override(raw: &str) -> Result<(String, TraceLevel), String> {
    let (name, level) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=LEVEL, got '{raw}'"))?;
    let level = level.parse::<TraceLevel>().map_err(|e| e.to_string())?;
    Ok((name.to_string(), level))
}
