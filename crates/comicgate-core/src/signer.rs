//! Credential signing for the upstream catalog API
//!
//! The upstream authenticates every call with `ts`, `apikey` and
//! `hash = md5(ts + private_key + public_key)`. MD5 is dictated by the
//! upstream contract.

use std::fmt;

use crate::types::AuthParams;

/// Derives per-request credentials from the two long-lived keys
#[derive(Clone)]
pub struct CredentialSigner {
    public_key: String,
    private_key: String,
}

impl CredentialSigner {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self { public_key: public_key.into(), private_key: private_key.into() }
    }

    /// Sign for the given instant. Call once per outbound request; the
    /// upstream rejects stale timestamps.
    pub fn sign(&self, now_ms: i64) -> AuthParams {
        let digest = md5::compute(format!("{}{}{}", now_ms, self.private_key, self.public_key));
        AuthParams {
            timestamp: now_ms,
            public_key: self.public_key.clone(),
            hash: format!("{:x}", digest),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl fmt::Debug for CredentialSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSigner")
            .field("public_key", &self.public_key)
            .field("private_key", &crate::sanitization::SANITIZED_PLACEHOLDER)
            .finish()
    }
}
