//! REST API module

pub mod handlers;
pub mod router;

pub use router::create_router;

use crate::{AppState, ServerError, ServerResult};
use std::net::SocketAddr;

/// Serve REST API until ctrl-c
pub async fn serve(app_state: AppState, addr: &str) -> ServerResult<()> {
    let app = create_router(app_state);

    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| ServerError::BadRequest(format!("Invalid address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Internal(format!("Failed to bind: {}", e)))?;

    tracing::info!("Starting REST API server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("REST API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
