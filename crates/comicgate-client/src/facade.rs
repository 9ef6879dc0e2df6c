//! Data-access facade
//!
//! One operation per resource kind. Each consults the cache (when one is
//! attached), otherwise calls the gateway and stores the successful body.
//! Failures are logged and returned; nothing is retried or partially cached.
//!
//! Concurrent misses for the same key are not coalesced: each issues its own
//! gateway call and the last one to finish wins the cache slot.

use comicgate_core::{QueryParams, ResourceKind};
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::key::{CacheKey, ALL_SUBJECTS};

#[derive(Debug, Clone)]
pub struct ComicsClient {
    http: Client,
    gateway_url: Url,
    request_timeout: Duration,
    cache_ttl: Duration,
    cache: Option<ResponseCache>,
}

impl ComicsClient {
    /// A facade without a cache; every call goes to the gateway.
    /// Use this where there is no per-session store to hold one.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let gateway_url = Url::parse(&config.gateway_url).map_err(|e| {
            ClientError::InvalidConfig(format!(
                "Invalid gateway URL '{}': {}",
                config.gateway_url, e
            ))
        })?;
        if gateway_url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig(format!(
                "Gateway URL '{}' cannot carry a path",
                config.gateway_url
            )));
        }
        if config.request_timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            http: Client::builder().build()?,
            gateway_url,
            request_timeout: config.request_timeout,
            cache_ttl: config.cache_ttl,
            cache: None,
        })
    }

    /// Attach a session-scoped cache
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// A single character by id
    pub async fn get_character(&self, id: &str) -> ClientResult<JsonValue> {
        let key = CacheKey::new(ResourceKind::Character, id, &QueryParams::new());
        let mut query = QueryParams::new();
        query.insert("id".to_string(), id.to_string());
        self.fetch(ResourceKind::Character, key, &query).await
    }

    /// Character listing filtered by `params`
    pub async fn get_characters(&self, params: &QueryParams) -> ClientResult<JsonValue> {
        let key = CacheKey::new(ResourceKind::Characters, ALL_SUBJECTS, params);
        self.fetch(ResourceKind::Characters, key, params).await
    }

    /// Comics featuring a character
    pub async fn get_comics(
        &self,
        character_id: &str,
        params: &QueryParams,
    ) -> ClientResult<JsonValue> {
        let key = CacheKey::new(ResourceKind::Comics, character_id, params);
        let query = with_character(params, character_id);
        self.fetch(ResourceKind::Comics, key, &query).await
    }

    /// Series featuring a character
    pub async fn get_series(
        &self,
        character_id: &str,
        params: &QueryParams,
    ) -> ClientResult<JsonValue> {
        let key = CacheKey::new(ResourceKind::Series, character_id, params);
        let query = with_character(params, character_id);
        self.fetch(ResourceKind::Series, key, &query).await
    }

    async fn fetch(
        &self,
        kind: ResourceKind,
        key: CacheKey,
        query: &QueryParams,
    ) -> ClientResult<JsonValue> {
        if let Some(hit) = self.cache.as_ref().and_then(|cache| cache.get(key.as_str())) {
            debug!("Cache hit for {}", key);
            return Ok(hit);
        }

        match self.request(kind, query).await {
            Ok(body) => {
                if let Some(cache) = &self.cache {
                    cache.put(key.into_string(), body.clone(), self.cache_ttl);
                }
                Ok(body)
            }
            Err(e) => {
                error!("Error fetching {} ({}): {}", kind, key, e);
                Err(e)
            }
        }
    }

    async fn request(&self, kind: ResourceKind, query: &QueryParams) -> ClientResult<JsonValue> {
        let url = self.endpoint(kind, query)?;
        let call = async {
            let response = self.http.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response
                    .json::<JsonValue>()
                    .await
                    .ok()
                    .and_then(|body| {
                        body.pointer("/error/message").and_then(JsonValue::as_str).map(str::to_string)
                    })
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
                return Err(ClientError::Status { status: status.as_u16(), message });
            }
            Ok::<_, ClientError>(response.json::<JsonValue>().await?)
        };

        tokio::time::timeout(self.request_timeout, call)
            .await
            .map_err(|_| ClientError::Timeout(self.request_timeout))?
    }

    /// `<gateway>/api/upstream/<kind>?<query>`
    fn endpoint(&self, kind: ResourceKind, query: &QueryParams) -> ClientResult<Url> {
        let mut url = self.gateway_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidConfig("Gateway URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "upstream", kind.as_str()]);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

/// Caller filters with `characters` set to the subject, keeping its position
/// if the caller already supplied one
fn with_character(params: &QueryParams, character_id: &str) -> QueryParams {
    let mut query = params.clone();
    query.insert("characters".to_string(), character_id.to_string());
    query
}
