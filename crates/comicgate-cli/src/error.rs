//! Error types for the CLI

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] comicgate_core::CoreError),

    #[error("Server error: {0}")]
    Server(#[from] comicgate_server::ServerError),

    #[error("Lookup failed: {0}")]
    Client(#[from] comicgate_client::ClientError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("General error: {0}")]
    General(String),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
