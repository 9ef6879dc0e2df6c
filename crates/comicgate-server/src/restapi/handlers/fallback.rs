//! Fallback for unmatched paths

use crate::{error::ErrorResponse, middleware::RequestId, ServerError};
use axum::{extract::Extension, http::StatusCode, response::Json};

/// Any route the router does not know
pub async fn not_found(
    Extension(request_id): Extension<RequestId>,
) -> (StatusCode, Json<ErrorResponse>) {
    ServerError::NotFound("API endpoint not found".into()).to_http_response(request_id.0)
}
