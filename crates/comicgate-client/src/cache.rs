//! Time-bounded response cache
//!
//! Entries are never evicted on read: an expired entry simply reports absent
//! and is overwritten by the next `put`. Capacity is unbounded; the cache is
//! meant to live no longer than the session that owns it.

use comicgate_core::{Clock, SystemClock};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// A stored response and when it was stored
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: JsonValue,
    /// Milliseconds since the Unix epoch
    pub stored_at: i64,
    pub ttl: Duration,
}

impl CacheEntry {
    /// Valid iff `now < stored_at + ttl`
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        now_ms < self.stored_at.saturating_add(ttl_ms)
    }
}

/// Session-scoped store of gateway responses. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Create a new empty cache on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), clock }
    }

    /// The value stored under `key` if it has not expired
    pub fn get(&self, key: &str) -> Option<JsonValue> {
        let now = self.clock.now_ms();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| entry.is_valid_at(now))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry
    pub fn put(&self, key: impl Into<String>, value: JsonValue, ttl: Duration) {
        let entry = CacheEntry { value, stored_at: self.clock.now_ms(), ttl };
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.into(), entry);
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries, returning how many were removed.
    /// Nothing calls this implicitly; long-lived owners may sweep periodically.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.is_valid_at(now));
        before - entries.len()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
