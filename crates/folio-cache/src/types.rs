//! Cache types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default time-to-live for stores built with [`crate::CacheStore::new`].
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Lifetime requested for a cache write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// Use the store's configured default.
    #[default]
    Default,
    /// Never expire within this run.
    Never,
    /// Expire after the given duration.
    After(Duration),
}

impl Ttl {
    /// Resolve against a store default. `None` means no expiration.
    pub fn resolve(self, default: Option<Duration>) -> Option<Duration> {
        match self {
            Ttl::Default => default,
            Ttl::Never => None,
            Ttl::After(d) if d.is_zero() => None,
            Ttl::After(d) => Some(d),
        }
    }
}

impl From<Duration> for Ttl {
    fn from(d: Duration) -> Self {
        if d.is_zero() { Ttl::Never } else { Ttl::After(d) }
    }
}

impl From<Option<Duration>> for Ttl {
    fn from(d: Option<Duration>) -> Self {
        d.map(Ttl::from).unwrap_or(Ttl::Never)
    }
}

/// A cached value and its expiration instant.
#[derive(Clone)]
pub struct CacheEntry {
    key: String,
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    pub(crate) fn new<T: Any + Send + Sync>(
        key: String,
        value: T,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            key,
            value: Arc::new(value),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Absolute expiration instant, `None` for run-scoped entries.
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// Borrow the payload if it was stored as a `T`.
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}
