//! Gateway configuration resolved from the environment

use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::signer::CredentialSigner;

pub const ENV_BASE_URL: &str = "MARVEL_BASE_URL";
pub const ENV_PUBLIC_KEY: &str = "MARVEL_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "MARVEL_PRIVATE_KEY";
pub const ENV_UPSTREAM_TIMEOUT_MS: &str = "COMICGATE_UPSTREAM_TIMEOUT_MS";

pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com/v1/public";
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5_000;

/// Settings for the upstream gateway
#[derive(Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub public_key: String,
    pub private_key: String,
    /// Deadline for one outbound upstream call
    pub deadline: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            public_key: String::new(),
            private_key: String::new(),
            deadline: Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS),
        }
    }
}

impl GatewayConfig {
    /// Resolve from process environment variables
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup; absent or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(public_key) = get(ENV_PUBLIC_KEY) {
            config.public_key = public_key;
        }
        if let Some(private_key) = get(ENV_PRIVATE_KEY) {
            config.private_key = private_key;
        }
        if let Some(raw) = get(ENV_UPSTREAM_TIMEOUT_MS) {
            let ms: u64 = raw.parse().map_err(|_| {
                CoreError::InvalidConfig(format!(
                    "{} must be a whole number of milliseconds, got '{}'",
                    ENV_UPSTREAM_TIMEOUT_MS, raw
                ))
            })?;
            config.deadline = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Names of credentials that are not configured
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.public_key.is_empty() {
            missing.push(ENV_PUBLIC_KEY);
        }
        if self.private_key.is_empty() {
            missing.push(ENV_PRIVATE_KEY);
        }
        missing
    }

    pub fn signer(&self) -> CredentialSigner {
        CredentialSigner::new(self.public_key.clone(), self.private_key.clone())
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("public_key", &self.public_key)
            .field("private_key", &crate::sanitization::SANITIZED_PLACEHOLDER)
            .field("deadline", &self.deadline)
            .finish()
    }
}
