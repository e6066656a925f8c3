//! Process-local memoization cache for Folio (one generation run).

pub mod keys;
pub mod memo;
pub mod store;
pub mod types;

pub use keys::{compose_key, derive_key, matches_prefix};
pub use memo::with_cache;
pub use store::CacheStore;
pub use types::{CacheEntry, CacheStats, DEFAULT_TTL, Ttl};
