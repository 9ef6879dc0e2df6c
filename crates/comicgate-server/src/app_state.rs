//! Application state shared by the REST handlers

use std::sync::Arc;

use comicgate_core::{Clock, GatewayConfig};

use crate::error::ServerResult;
use crate::upstream::UpstreamGateway;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<UpstreamGateway>,
}

impl AppState {
    /// Create app state from gateway configuration
    pub fn from_config(config: &GatewayConfig) -> ServerResult<Self> {
        Ok(Self::new(UpstreamGateway::new(config)?))
    }

    /// Create app state whose gateway signs with the given clock
    pub fn with_clock(config: &GatewayConfig, clock: Arc<dyn Clock>) -> ServerResult<Self> {
        Ok(Self::new(UpstreamGateway::with_clock(config, clock)?))
    }

    pub fn new(gateway: UpstreamGateway) -> Self {
        Self { gateway: Arc::new(gateway) }
    }
}
