//! Server error types

use axum::{http::StatusCode, response::Json};
use comicgate_core::CoreError;
use serde::Serialize;
use std::time::Duration;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error enum
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream call exceeded {}ms deadline", .0.as_millis())]
    UpstreamTimeout(Duration),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownResource(_) => ServerError::NotFound("API endpoint not found".into()),
            CoreError::MissingSubjectId(_) => ServerError::BadRequest(err.to_string()),
            CoreError::InvalidConfig(msg) => ServerError::Internal(msg),
        }
    }
}

/// Error response DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
    pub metadata: ErrorMeta,
}

#[derive(Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorMeta {
    pub request_id: String,
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::UpstreamTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            ServerError::Upstream(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_http_response(&self, request_id: String) -> (StatusCode, Json<ErrorResponse>) {
        let (code, message) = match self {
            ServerError::BadRequest(msg) => ("BAD_REQUEST", msg.clone()),
            ServerError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            ServerError::UpstreamTimeout(_) => ("UPSTREAM_TIMEOUT", "Request timeout".into()),
            // upstream detail stays in the logs
            ServerError::Upstream(_) => {
                ("UPSTREAM_ERROR", "Failed to fetch from upstream API".into())
            }
            ServerError::Internal(msg) => ("INTERNAL", msg.clone()),
        };

        let response = ErrorResponse {
            success: false,
            error: ErrorDetails { code: code.to_string(), message },
            metadata: ErrorMeta { request_id },
        };

        (self.status_code(), Json(response))
    }
}
