//! Cache key construction

use comicgate_core::{QueryParams, ResourceKind};
use serde_json::Value as JsonValue;
use std::fmt;

/// Subject used for lookups that are not scoped to one entity
pub const ALL_SUBJECTS: &str = "all";

/// `<resource>-<subject>-<params>` where `<params>` is the JSON object of the
/// caller's parameters in insertion order. The same parameters supplied in a
/// different order produce a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(kind: ResourceKind, subject_id: &str, params: &QueryParams) -> Self {
        Self(format!("{}-{}-{}", kind.as_str(), subject_id, canonical_params(params)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JSON object text in insertion order
fn canonical_params(params: &QueryParams) -> String {
    let members: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}:{}", JsonValue::from(k.as_str()), JsonValue::from(v.as_str())))
        .collect();
    format!("{{{}}}", members.join(","))
}
