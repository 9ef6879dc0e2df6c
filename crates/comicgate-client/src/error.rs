use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Gateway responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// HTTP status reported by the gateway, if the call got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
