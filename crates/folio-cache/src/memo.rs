//! Memoizing wrapper for async fetch functions.

use crate::keys::derive_key;
use crate::store::CacheStore;
use crate::types::Ttl;
use futures::future::{self, BoxFuture, FutureExt};
use serde::Serialize;
use std::any::Any;
use std::future::Future;
use tracing::warn;

/// Wrap `f` so that repeated calls with equal arguments hit `store`.
///
/// The key is `key_prefix` plus the argument rendered by [`derive_key`].
/// Only `Ok` results are stored; an `Err` leaves the cache untouched so
/// the next call runs `f` again. Arguments that fail to serialize
/// bypass the cache.
pub fn with_cache<A, T, E, F, Fut>(
    store: CacheStore,
    key_prefix: impl Into<String>,
    ttl: impl Into<Ttl>,
    f: F,
) -> impl Fn(A) -> BoxFuture<'static, Result<T, E>>
where
    A: Serialize,
    T: Any + Clone + Send + Sync,
    E: Send + 'static,
    F: Fn(A) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let key_prefix = key_prefix.into();
    let ttl = ttl.into();

    move |args: A| {
        let key = match derive_key(&key_prefix, &args) {
            Ok(key) => key,
            Err(e) => {
                warn!(prefix = %key_prefix, error = %e, "Cannot derive cache key, calling through");
                return f(args).boxed();
            }
        };

        if let Some(hit) = store.get::<T>(&key) {
            return future::ready(Ok(hit)).boxed();
        }

        let store = store.clone();
        let fut = f(args);
        async move {
            let value = fut.await?;
            store.set_with_ttl(key, value.clone(), ttl);
            Ok::<T, E>(value)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let store = CacheStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let double = with_cache(store.clone(), "double", Ttl::Default, move |n: u32| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(n * 2)
            }
        });

        assert_eq!(double(21).await, Ok(42));
        assert_eq!(double(21).await, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(double(5).await, Ok(10));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(store.has("double:21"));
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let store = CacheStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let flaky = with_cache(store.clone(), "flaky", Ttl::Never, move |_: ()| {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err("boom".to_string())
                } else {
                    Ok("ok".to_string())
                }
            }
        });

        assert_eq!(flaky(()).await, Err("boom".to_string()));
        assert!(store.is_empty());
        assert_eq!(flaky(()).await, Ok("ok".to_string()));
        assert_eq!(flaky(()).await, Ok("ok".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_is_honoured() {
        let store = CacheStore::run_scoped();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let fetch = with_cache(store, "fetch", Duration::from_secs(1), move |_: u8| {
            let counter = counter.clone();
            async move { Ok::<_, String>(counter.fetch_add(1, Ordering::SeqCst)) }
        });

        assert_eq!(fetch(1).await, Ok(0));
        assert_eq!(fetch(1).await, Ok(0));
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(fetch(1).await, Ok(1));
    }
}
