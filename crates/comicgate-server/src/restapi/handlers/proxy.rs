//! Upstream proxy handler

use crate::{
    error::{ErrorResponse, ServerResult},
    middleware::RequestId,
    AppState,
};
use axum::{
    extract::{Extension, Path, RawQuery, State},
    http::StatusCode,
    response::Json,
};
use comicgate_core::{ProxyRequest, QueryParams, ResourceKind};
use serde_json::Value as JsonValue;

/// GET /api/upstream/:kind
///
/// Replies with the upstream status and its shaped JSON body.
pub async fn proxy(
    State(app_state): State<AppState>,
    Path(kind): Path<String>,
    RawQuery(query): RawQuery,
    Extension(request_id): Extension<RequestId>,
) -> Result<(StatusCode, Json<JsonValue>), (StatusCode, Json<ErrorResponse>)> {
    let request = parse_request(&kind, query.as_deref()).map_err(|e| {
        tracing::debug!(request_id = request_id.as_str(), "Rejected {}: {}", kind, e);
        e.to_http_response(request_id.0.clone())
    })?;

    let response = app_state
        .gateway
        .proxy(&request)
        .await
        .map_err(|e| e.to_http_response(request_id.0.clone()))?;

    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok((status, Json(response.body)))
}

/// Resolve the path segment and raw query into a validated request
pub fn parse_request(kind: &str, query: Option<&str>) -> ServerResult<ProxyRequest> {
    let kind: ResourceKind = kind.parse()?;
    let params: QueryParams = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .into_owned()
        .collect();
    Ok(ProxyRequest::new(kind, params)?)
}
