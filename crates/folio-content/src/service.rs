//! Content service shared by all accessors.

use crate::adapter::PostAdapter;
use folio_cache::{CacheStore, Ttl, with_cache};
use folio_client::ContentClient;
use folio_core::Result;
use serde::Serialize;
use std::any::Any;
use std::future::Future;
use tracing::debug;

/// Client, cache and adapter for one generation run.
///
/// Accessors live in [`crate::posts`] and [`crate::settings`].
#[derive(Clone)]
pub struct ContentService {
    pub(crate) client: ContentClient,
    pub(crate) cache: CacheStore,
    pub(crate) adapter: PostAdapter,
}

impl ContentService {
    pub fn new(client: ContentClient, cache: CacheStore, adapter: PostAdapter) -> Self {
        Self {
            client,
            cache,
            adapter,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn client(&self) -> &ContentClient {
        &self.client
    }

    pub fn adapter(&self) -> &PostAdapter {
        &self.adapter
    }

    /// Memoize `fetch` under `key_prefix` and `args` through [`with_cache`].
    ///
    /// `fetch` receives a handle to this service. Failures are not cached.
    pub(crate) async fn cached<A, T, F, Fut>(
        &self,
        key_prefix: &str,
        args: A,
        fetch: F,
    ) -> Result<T>
    where
        A: Serialize,
        T: Any + Clone + Send + Sync,
        F: Fn(ContentService) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let service = self.clone();
        let prefix = key_prefix.to_string();
        let memoized = with_cache(self.cache.clone(), key_prefix, Ttl::Default, move |_: A| {
            debug!(prefix = %prefix, "Fetching content");
            fetch(service.clone())
        });
        memoized(args).await
    }
}
