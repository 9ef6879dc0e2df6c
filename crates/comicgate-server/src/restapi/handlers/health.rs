//! Health check handlers

use axum::response::Json;
use serde_json::json;

/// GET /api/health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "comicgate-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
