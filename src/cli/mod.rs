//! Command-line interface

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use crate::domain::errors::ConfigError;

/// Print a command error and exit with a non-zero status.
///
/// Configuration errors exit with status 2, everything else with 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "error": format!("{err:#}"),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }

    let code = if err.downcast_ref::<ConfigError>().is_some() {
        2
    } else {
        1
    };
    std::process::exit(code);
}
