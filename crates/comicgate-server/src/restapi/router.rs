//! REST API router

use crate::{middleware::RequestIdLayer, AppState};
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/upstream/:kind", get(super::handlers::proxy::proxy))
        .route("/api/health", get(super::handlers::health::health_check))
        .fallback(super::handlers::fallback::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(RequestIdLayer))
        .with_state(app_state)
}
