//! Utility functions for the CLI

use crate::error::{CliError, CliResult};
use colored::{ColoredString, Colorize};
use comicgate_core::QueryParams;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize tracing; `RUST_LOG` wins over the verbosity flag
pub fn init_tracing(verbose: bool) -> CliResult<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::General(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn warning(msg: &str) -> ColoredString {
        msg.yellow().bold()
    }
}

/// Parse a single `key=value` query parameter
pub fn parse_param(raw: &str) -> CliResult<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidArgument(format!(
            "Invalid parameter '{}', expected key=value",
            raw
        ))),
    }
}

/// Collect `--param` values in the order given; a repeated key keeps its first position
pub fn parse_params(raw: &[String]) -> CliResult<QueryParams> {
    let mut params = QueryParams::new();
    for item in raw {
        let (key, value) = parse_param(item)?;
        params.insert(key, value);
    }
    Ok(params)
}
