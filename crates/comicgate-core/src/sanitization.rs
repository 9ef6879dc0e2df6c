//! Utilities for keeping credentials out of logs

use url::Url;

/// Query parameters that carry credentials
const SENSITIVE_PARAMS: &[&str] = &["apikey", "hash", "private_key", "privatekey"];

/// Sanitized placeholder for sensitive values
pub const SANITIZED_PLACEHOLDER: &str = "***REDACTED***";

/// Check if a query parameter name carries a credential
pub fn is_sensitive_param(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_PARAMS.contains(&lower.as_str())
}

/// Render a URL for logging with credential values masked
pub fn redact_url(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if is_sensitive_param(&k) {
                SANITIZED_PLACEHOLDER.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
