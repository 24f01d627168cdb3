//! Agent Trace CLI entry point.

use anyhow::Context;
use clap::Parser;

use agent_trace::cli::{commands, Cli, Commands};
use agent_trace::infrastructure::logging::LoggerImpl;
use agent_trace::ConfigLoader;

fn main() {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("failed to load configuration");

    let mut config = match config {
        Ok(config) => config,
        Err(err) => agent_trace::cli::handle_error(err, cli.json),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level.clone_from(level);
    }

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => agent_trace::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Sanitize(args) => commands::sanitize::execute(args, cli.json),
        Commands::Trace(args) => commands::trace::execute(args, &config, cli.json),
    };

    if let Err(err) = result {
        agent_trace::cli::handle_error(err, cli.json);
    }
}
