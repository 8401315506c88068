//! In-memory caching for aggregated source data.
//!
//! Each entry carries its own TTL; an entry is valid iff
//! `now - stored_at < ttl`. Expired entries are treated as absent and purged
//! lazily on the read path. Absence is always a normal outcome, never an
//! error.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default TTL applied when `put` receives no override.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry {
    body: String,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_valid(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    default_ttl: Duration,
}

impl CacheInner {
    fn new(default_ttl: Duration) -> Self {
        Self {
            map: HashMap::new(),
            default_ttl,
        }
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let now = Instant::now();
        match self.map.get(key) {
            Some(entry) if entry.is_valid(now) => Some(entry.body.clone()),
            Some(_) => {
                // Expired entries are removed on lookup.
                self.map.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&mut self, key: String, body: String, ttl_override: Option<Duration>) {
        let ttl = ttl_override.unwrap_or(self.default_ttl);
        self.map.insert(
            key,
            CacheEntry {
                body,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    fn clear_expired(&mut self) {
        let now = Instant::now();
        self.map.retain(|_, entry| entry.is_valid(now));
    }

    fn clear(&mut self) {
        self.map.clear();
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Shared in-memory cache with per-entry TTLs.
///
/// Explicitly constructed and dependency-injected; cloning shares the same
/// underlying map, so tests can instantiate isolated instances while the
/// aggregator and refresh coordinator share one.
#[derive(Debug, Clone)]
pub struct CacheStore {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl CacheStore {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner::new(default_ttl))),
        }
    }

    /// Get the raw cached body for a key if present and not expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut store = self.inner.write().await;
        store.get(key)
    }

    /// Store a body under a key. `ttl_override` replaces the default TTL for
    /// this entry only (the certification domain uses this for its 1 h TTL).
    pub async fn put(&self, key: impl Into<String>, body: String, ttl_override: Option<Duration>) {
        let mut store = self.inner.write().await;
        store.put(key.into(), body, ttl_override);
    }

    /// Typed read: a cached body that fails to deserialize is dropped and
    /// reported as a miss, so schema drift self-heals on the next fetch.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let body = self.get(key).await?;
        match serde_json::from_str(&body) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(key, %error, "dropping undecodable cache entry");
                let mut store = self.inner.write().await;
                store.map.remove(key);
                None
            }
        }
    }

    /// Typed write. Serialization of the crate's own snapshot types cannot
    /// realistically fail; if it ever does the entry is skipped and logged
    /// rather than surfaced, since caching is best-effort.
    pub async fn put_json<T: Serialize>(&self, key: impl Into<String>, value: &T, ttl_override: Option<Duration>) {
        match serde_json::to_string(value) {
            Ok(body) => self.put(key, body, ttl_override).await,
            Err(error) => tracing::error!(%error, "failed to serialize cache payload"),
        }
    }

    /// Remove expired entries eagerly.
    pub async fn clear_expired(&self) {
        let mut store = self.inner.write().await;
        store.clear_expired();
    }

    /// Drop every entry. Idempotent: clearing an empty cache is a no-op.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.clear();
    }

    /// Number of stored entries, including ones that have expired but not
    /// yet been purged.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
