//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::sanitize::SanitizeArgs;
use crate::cli::commands::trace::TraceArgs;

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(name = "agent-trace")]
#[command(about = "Agent Trace - trace channels with secret redaction and log-command sanitization", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .agent/
    #[arg(short, long, global = true, env = "AGENT_TRACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the process log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Defuse agent control directives in text or stdin lines
    Sanitize(SanitizeArgs),

    /// Write stdin lines through a trace channel
    Trace(TraceArgs),
}
