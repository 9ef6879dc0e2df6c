//! The upstream gateway

use std::sync::Arc;
use std::time::Duration;

use comicgate_core::{
    redact_url, shape, Clock, CredentialSigner, GatewayConfig, ProxyRequest, SystemClock,
    UpstreamResponse,
};
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, error, instrument, warn};

use super::deadline::Deadline;
use super::target::target_url;
use crate::error::{ServerError, ServerResult};

/// Signs and forwards requests to the upstream catalog API
#[derive(Debug, Clone)]
pub struct UpstreamGateway {
    client: Client,
    base_url: String,
    signer: CredentialSigner,
    deadline: Duration,
    clock: Arc<dyn Clock>,
}

impl UpstreamGateway {
    pub fn new(config: &GatewayConfig) -> ServerResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a gateway reading time from `clock` (used for signing)
    pub fn with_clock(config: &GatewayConfig, clock: Arc<dyn Clock>) -> ServerResult<Self> {
        if config.deadline.is_zero() {
            return Err(ServerError::Internal("Upstream deadline must be greater than 0".into()));
        }

        let client = Client::builder()
            .user_agent(concat!("comicgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServerError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            signer: config.signer(),
            deadline: config.deadline,
            clock,
        })
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Forward one request upstream and shape the reply.
    ///
    /// Credentials are signed fresh for every call. The call is bound to its
    /// own deadline; nothing is retried.
    #[instrument(level = "debug", skip(self, request), fields(kind = %request.kind()))]
    pub async fn proxy(&self, request: &ProxyRequest) -> ServerResult<UpstreamResponse> {
        let auth = self.signer.sign(self.clock.now_ms());
        let url = target_url(&self.base_url, request, &auth)?;
        debug!("Forwarding to {}", redact_url(&url));

        let deadline = Deadline::start(self.deadline);
        let fetch = async {
            let response = self.client.get(url).send().await?;
            let status_code = response.status().as_u16();
            let body = response.json::<JsonValue>().await?;
            Ok::<_, reqwest::Error>(UpstreamResponse { status_code, body })
        };

        match deadline.race(fetch).await {
            Ok(Ok(response)) => {
                debug!(status = response.status_code, "Upstream responded");
                Ok(shape(request.kind(), response))
            }
            Ok(Err(e)) => {
                // the URL carries credentials
                let e = e.without_url();
                error!("Error fetching upstream API ({}): {}", request.kind(), e);
                Err(ServerError::Upstream(e.to_string()))
            }
            Err(exceeded) => {
                warn!(
                    "Upstream call for {} aborted after {}ms",
                    request.kind(),
                    exceeded.0.as_millis()
                );
                Err(ServerError::UpstreamTimeout(exceeded.0))
            }
        }
    }
}
