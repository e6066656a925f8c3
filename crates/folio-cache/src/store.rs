//! In-memory key/value store with per-entry expiration.

use crate::keys::matches_prefix;
use crate::types::{CacheEntry, CacheStats, DEFAULT_TTL, Ttl};
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Shared memoization store for one generation run.
///
/// Cloning is cheap and every clone sees the same entries. Values are
/// stored type-erased and read back by type, so a cached `None` of an
/// `Option<T>` is a hit and stays distinct from an absent key.
#[derive(Clone)]
pub struct CacheStore {
    inner: Arc<Inner>,
}

struct Inner {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStore {
    /// Create a store whose entries expire after [`DEFAULT_TTL`] by default.
    pub fn new() -> Self {
        Self::with_default_ttl(Some(DEFAULT_TTL))
    }

    /// Create a store whose entries never expire unless a TTL is given.
    pub fn run_scoped() -> Self {
        Self::with_default_ttl(None)
    }

    pub fn with_default_ttl(default_ttl: Option<Duration>) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(HashMap::new()),
                default_ttl,
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
                evictions: AtomicU64::new(0),
            }),
        }
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.inner.default_ttl
    }

    /// Get a live value stored as `T`.
    ///
    /// Expired entries are evicted and reported as absent.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Any + Clone + Send + Sync,
    {
        let now = Instant::now();
        let expired = {
            let entries = self.read();
            match entries.get(key) {
                None => false,
                Some(entry) if entry.is_expired_at(now) => true,
                Some(entry) => {
                    if let Some(value) = entry.value::<T>() {
                        self.inner.hits.fetch_add(1, Ordering::Relaxed);
                        debug!(key = %key, "Cache hit");
                        return Some(value.clone());
                    }
                    warn!(
                        key = %key,
                        expected = std::any::type_name::<T>(),
                        "Cached value has a different type, treating as miss"
                    );
                    false
                }
            }
        };

        if expired {
            self.evict_if_expired(key, now);
        }
        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Cache miss");
        None
    }

    /// Store `value` under `key` with the store's default TTL.
    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.set_with_ttl(key, value, Ttl::Default);
    }

    /// Store or overwrite `key`.
    pub fn set_with_ttl<T>(&self, key: impl Into<String>, value: T, ttl: impl Into<Ttl>)
    where
        T: Any + Send + Sync,
    {
        let key = key.into();
        let ttl = ttl.into().resolve(self.inner.default_ttl);
        let entry = CacheEntry::new(key.clone(), value, ttl);
        debug!(key = %key, ttl_ms = ttl.map(|t| t.as_millis() as u64), "Cache set");
        self.write().insert(key, entry);
    }

    /// Whether a live entry exists for `key`, whatever its type.
    pub fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        let expired = match self.read().get(key) {
            None => return false,
            Some(entry) => entry.is_expired_at(now),
        };
        if expired {
            self.evict_if_expired(key, now);
            return false;
        }
        true
    }

    /// Remove one entry. Returns whether it existed.
    pub fn delete(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    /// Remove every entry whose key starts with `prefix`.
    pub fn delete_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|key, _| !matches_prefix(key, prefix));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.write().clear();
        debug!("Cache cleared");
    }

    /// Sweep expired entries. Returns how many were removed.
    pub fn clean_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();
        if removed > 0 {
            self.inner
                .evictions
                .fetch_add(removed as u64, Ordering::Relaxed);
            debug!(removed, "Expired cache entries swept");
        }
        removed
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            evictions: self.inner.evictions.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn evict_if_expired(&self, key: &str, now: Instant) {
        let mut entries = self.write();
        // Re-check under the write lock: a concurrent set may have replaced it.
        if entries.get(key).is_some_and(|e| e.is_expired_at(now)) {
            entries.remove(key);
            self.inner.evictions.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Expired cache entry evicted");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.inner
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.inner
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let store = CacheStore::new();
        store.set("greeting", "hello".to_string());

        assert_eq!(store.get::<String>("greeting"), Some("hello".to_string()));
        assert!(store.has("greeting"));
    }

    #[test]
    fn test_cached_none_is_distinct_from_absent() {
        let store = CacheStore::new();
        store.set("missing-translation", None::<String>);

        assert_eq!(store.get::<Option<String>>("missing-translation"), Some(None));
        assert!(store.has("missing-translation"));
        assert_eq!(store.get::<Option<String>>("never-set"), None);
        assert!(!store.has("never-set"));
    }

    #[test]
    fn test_overwrite() {
        let store = CacheStore::new();
        store.set("key", 1u32);
        store.set("key", 2u32);

        assert_eq!(store.get::<u32>("key"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_type_mismatch_is_a_miss() {
        let store = CacheStore::new();
        store.set("key", 1u32);

        assert_eq!(store.get::<String>("key"), None);
        assert!(store.has("key"));
    }

    #[test]
    fn test_delete_and_clear() {
        let store = CacheStore::new();
        store.set("key1", 1u32);
        store.set("key2", 2u32);
        store.set("key3", 3u32);

        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(!store.has("key1"));
        assert!(store.has("key2"));

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_prefix() {
        let store = CacheStore::new();
        store.set("all_posts:tags", 1u32);
        store.set("all_posts:authors", 2u32);
        store.set("site_information:title", 3u32);

        assert_eq!(store.delete_prefix("all_posts:"), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let store = CacheStore::new();
        let other = store.clone();
        store.set("key", 7u32);

        assert_eq!(other.get::<u32>("key"), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiration() {
        let store = CacheStore::new();
        store.set_with_ttl("key", "value".to_string(), Duration::from_millis(1000));

        tokio::time::advance(Duration::from_millis(999)).await;
        assert_eq!(store.get::<String>("key"), Some("value".to_string()));

        tokio::time::advance(Duration::from_millis(2)).await;
        assert_eq!(store.get::<String>("key"), None);
        assert_eq!(store.len(), 0, "expired entry should be evicted on read");
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_ttl_applies() {
        let store = CacheStore::with_default_ttl(Some(Duration::from_secs(10)));
        store.set("key", 1u32);

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(!store.has("key"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_scoped_entries_never_expire() {
        let store = CacheStore::run_scoped();
        store.set("key", 1u32);

        tokio::time::advance(Duration::from_secs(86_400)).await;
        assert_eq!(store.get::<u32>("key"), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clean_expired_counts_removed() {
        let store = CacheStore::run_scoped();
        store.set_with_ttl("short1", 1u32, Duration::from_millis(10));
        store.set_with_ttl("short2", 2u32, Duration::from_millis(10));
        store.set("forever", 3u32);

        tokio::time::advance(Duration::from_millis(20)).await;
        assert_eq!(store.clean_expired(), 2);
        assert_eq!(store.clean_expired(), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().evictions, 2);
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let store = CacheStore::new();
        store.set("key", 1u32);
        let _ = store.get::<u32>("key");
        let _ = store.get::<u32>("key");
        let _ = store.get::<u32>("other");

        let stats = store.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }
}
