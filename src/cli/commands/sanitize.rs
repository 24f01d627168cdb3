//! `sanitize` command: defuse control directives in untrusted text.
//!
//! Stdin is processed line by line; each sanitized line is printed before
//! the next one is read.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::output::{output_line, CommandOutput};
use crate::services::log_sanitizer::{sanitize, sanitize_base64};

/// Arguments of the `sanitize` command.
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Text to sanitize; reads stdin line by line when omitted
    pub text: Option<String>,

    /// Only sanitize base64 payloads; other input is passed through unchanged
    #[arg(long)]
    pub base64_only: bool,
}

/// One sanitized input line.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SanitizedLine {
    /// Sanitized text
    pub line: String,
    /// Whether sanitizing changed the line
    pub defused: bool,
    /// Whether base64-only mode passed the line through
    pub not_base64: bool,
}

impl CommandOutput for SanitizedLine {
    fn to_human(&self) -> String {
        self.line.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Counters accumulated over a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SanitizeSummary {
    /// Lines processed
    pub lines: usize,
    /// Lines changed
    pub defused: usize,
    /// Lines passed through by base64-only mode
    pub not_base64: usize,
}

/// Run the `sanitize` command.
pub fn execute(args: SanitizeArgs, json_mode: bool) -> Result<()> {
    let emit = |line: &SanitizedLine| output_line(line, json_mode);

    let summary = match args.text {
        Some(text) => sanitize_lines([text], args.base64_only, emit),
        None => {
            let mut read_error = None;
            let lines = io::stdin()
                .lock()
                .lines()
                .map_while(|line| line.map_err(|err| read_error = Some(err)).ok());
            let summary = sanitize_lines(lines, args.base64_only, emit);
            if let Some(err) = read_error {
                return Err(err).context("failed to read stdin");
            }
            summary
        }
    };

    debug!(
        lines = summary.lines,
        defused = summary.defused,
        not_base64 = summary.not_base64,
        "sanitize finished"
    );
    Ok(())
}

/// Sanitize a single line.
///
/// In base64-only mode a line that is not a base64 text payload is passed
/// through unchanged and flagged.
pub fn sanitize_line(input: String, base64_only: bool) -> SanitizedLine {
    if !base64_only {
        let line = sanitize(&input);
        return SanitizedLine {
            defused: line != input,
            line,
            not_base64: false,
        };
    }

    match sanitize_base64(&input) {
        Ok(line) => SanitizedLine {
            defused: line != input,
            line,
            not_base64: false,
        },
        Err(reason) => {
            info!(%reason, "passing line through unchanged");
            SanitizedLine {
                line: input,
                defused: false,
                not_base64: true,
            }
        }
    }
}

/// Sanitize each line as it is pulled from `inputs`, handing it to `emit`
/// before reading the next one.
pub fn sanitize_lines(
    inputs: impl IntoIterator<Item = String>,
    base64_only: bool,
    mut emit: impl FnMut(&SanitizedLine),
) -> SanitizeSummary {
    let mut summary = SanitizeSummary::default();

    for input in inputs {
        let sanitized = sanitize_line(input, base64_only);

        summary.lines += 1;
        summary.defused += usize::from(sanitized.defused);
        summary.not_base64 += usize::from(sanitized.not_base64);
        emit(&sanitized);
    }

    summary
}
