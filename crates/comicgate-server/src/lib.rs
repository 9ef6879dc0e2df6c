//! Comicgate Server
//!
//! HTTP gateway in front of the upstream catalog API. Each request is signed
//! with fresh credentials, forwarded under a deadline and shaped before it
//! is returned.

pub mod app_state;
pub mod error;
pub mod middleware;
pub mod restapi;
pub mod upstream;

// Re-export key types
pub use app_state::AppState;
pub use error::{ServerError, ServerResult};
pub use upstream::UpstreamGateway;

// REST API
pub async fn serve_rest(app_state: AppState, addr: &str) -> ServerResult<()> {
    restapi::serve(app_state, addr).await
}
