//! Client configuration

use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
/// Ten minutes
pub const DEFAULT_CACHE_TTL_MS: u64 = 600_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the gateway, e.g. `http://localhost:3000`
    pub gateway_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            cache_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
        }
    }
}

impl ClientConfig {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self { gateway_url: gateway_url.into(), ..Self::default() }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}
