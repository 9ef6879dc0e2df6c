//! Resource kinds, proxy requests and the upstream response envelope

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Query parameters in caller insertion order.
///
/// Order is significant: it is preserved on the wire and in cache keys.
pub type QueryParams = IndexMap<String, String>;

/// The closed set of upstream entity categories the gateway serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Characters,
    Character,
    Comics,
    Series,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Characters,
        ResourceKind::Character,
        ResourceKind::Comics,
        ResourceKind::Series,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Characters => "characters",
            ResourceKind::Character => "character",
            ResourceKind::Comics => "comics",
            ResourceKind::Series => "series",
        }
    }

    /// Whether the kind addresses a single entity by id
    pub fn requires_subject(&self) -> bool {
        matches!(self, ResourceKind::Character)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownResource(s.to_string()))
    }
}

/// A validated inbound request for one upstream resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    kind: ResourceKind,
    params: QueryParams,
}

impl ProxyRequest {
    /// Build a request, rejecting a `character` lookup without a non-empty `id`
    pub fn new(kind: ResourceKind, params: QueryParams) -> CoreResult<Self> {
        let request = Self { kind, params };
        if kind.requires_subject() && request.subject_id().is_none() {
            return Err(CoreError::MissingSubjectId("Character"));
        }
        Ok(request)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.params
            .get("id")
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// Per-request credentials the upstream API requires on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub public_key: String,
    pub hash: String,
}

impl AuthParams {
    pub const TIMESTAMP: &'static str = "ts";
    pub const PUBLIC_KEY: &'static str = "apikey";
    pub const HASH: &'static str = "hash";

    /// Query parameter names reserved for credentials
    pub const RESERVED: [&'static str; 3] = [Self::TIMESTAMP, Self::PUBLIC_KEY, Self::HASH];

    /// Credentials as query pairs, in wire order
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            (Self::TIMESTAMP, self.timestamp.to_string()),
            (Self::PUBLIC_KEY, self.public_key.clone()),
            (Self::HASH, self.hash.clone()),
        ]
    }
}

/// Upstream reply: HTTP status plus the JSON body, passed through opaquely
/// apart from `data.results`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status_code: u16,
    pub body: JsonValue,
}

impl UpstreamResponse {
    /// The `code` field the upstream embeds in its body
    pub fn code(&self) -> Option<i64> {
        self.body.get("code").and_then(JsonValue::as_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resource_kind_round_trip_names() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_resource_kind() {
        let err = "creators".parse::<ResourceKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownResource(ref s) if s == "creators"));
        // names are case-sensitive
        assert!("Comics".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_character_requires_id() {
        let err = ProxyRequest::new(ResourceKind::Character, QueryParams::new()).unwrap_err();
        assert!(matches!(err, CoreError::MissingSubjectId(_)));
        assert_eq!(err.to_string(), "Character id is required");

        let empty = ProxyRequest::new(ResourceKind::Character, params(&[("id", "")]));
        assert!(empty.is_err());

        let ok = ProxyRequest::new(ResourceKind::Character, params(&[("id", "1009368")])).unwrap();
        assert_eq!(ok.subject_id(), Some("1009368"));
    }

    #[test]
    fn test_list_kinds_do_not_require_id() {
        for kind in [ResourceKind::Characters, ResourceKind::Comics, ResourceKind::Series] {
            assert!(ProxyRequest::new(kind, QueryParams::new()).is_ok());
        }
    }

    #[test]
    fn test_auth_query_pairs_order() {
        let auth = AuthParams { timestamp: 42, public_key: "pub".into(), hash: "abc".into() };
        let pairs = auth.query_pairs();
        assert_eq!(pairs[0], ("ts", "42".to_string()));
        assert_eq!(pairs[1], ("apikey", "pub".to_string()));
        assert_eq!(pairs[2], ("hash", "abc".to_string()));
    }

    #[test]
    fn test_upstream_code() {
        let resp = UpstreamResponse { status_code: 200, body: json!({"code": 200}) };
        assert_eq!(resp.code(), Some(200));
        let resp = UpstreamResponse { status_code: 409, body: json!({"code": "MissingParameter"}) };
        assert_eq!(resp.code(), None);
    }
}
