//! Process-wide product cache with ttl-gated refresh.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::error::CatalogError;
use crate::product::Product;
use crate::snapshot::CatalogSnapshot;
use crate::source::ProductSource;

/// Shared catalog cache. Construct once, wrap in `Arc`, and hand clones to
/// every request handler — the snapshot behind the `RwLock` is the only
/// shared mutable state in the system.
///
/// The snapshot is swapped as a whole value under the write guard, so readers
/// never observe partial items with a stale timestamp or vice versa.
pub struct CatalogCache<S> {
    source: S,
    snapshot: RwLock<CatalogSnapshot>,
}

impl<S: ProductSource> CatalogCache<S> {
    /// Cache that starts empty; the first read fetches from `source`.
    pub fn new(source: S) -> Self {
        Self::with_snapshot(source, CatalogSnapshot::empty())
    }

    /// Cache pre-seeded with a snapshot. Used by tests and warm boots.
    pub fn with_snapshot(source: S, snapshot: CatalogSnapshot) -> Self {
        Self {
            source,
            snapshot: RwLock::new(snapshot),
        }
    }

    /// The upstream source behind this cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current products, served from the snapshot while it is valid.
    ///
    /// A valid snapshot (non-empty, younger than [`crate::CATALOG_TTL`]) is
    /// returned without touching the network. Otherwise the upstream is
    /// fetched and the snapshot replaced wholesale. Concurrent misses
    /// serialize on the write guard and the losers observe the winner's
    /// refresh instead of fetching again.
    ///
    /// # Errors
    /// Any fetch failure propagates as [`CatalogError`]; a stale snapshot is
    /// never served as a fallback, and no retry happens here.
    #[instrument(skip_all)]
    pub async fn get(&self) -> Result<Arc<[Product]>, CatalogError> {
        if let Some(items) = self.snapshot.read().await.fresh_items() {
            debug!(products = items.len(), "catalog cache hit");
            return Ok(items);
        }

        let mut guard = self.snapshot.write().await;
        // A concurrent caller may have refreshed while we waited for the guard.
        if let Some(items) = guard.fresh_items() {
            debug!(products = items.len(), "catalog refreshed by concurrent caller");
            return Ok(items);
        }

        let items = self.fetch_into(&mut guard).await?;
        debug!(products = items.len(), "catalog snapshot replaced");
        Ok(items)
    }

    /// Unconditional fetch-and-replace, bypassing the ttl gate.
    #[instrument(skip_all)]
    pub async fn refresh(&self) -> Result<Arc<[Product]>, CatalogError> {
        let mut guard = self.snapshot.write().await;
        let items = self.fetch_into(&mut guard).await?;
        debug!(products = items.len(), "catalog snapshot force-refreshed");
        Ok(items)
    }

    /// Copy of the current snapshot, for introspection.
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.read().await.clone()
    }

    async fn fetch_into(
        &self,
        guard: &mut CatalogSnapshot,
    ) -> Result<Arc<[Product]>, CatalogError> {
        let items = self.source.fetch_products().await?;
        if items.is_empty() {
            // Stored anyway; an empty snapshot stays invalid and the next
            // read retries the upstream.
            warn!("catalog source returned an empty product list");
        }
        *guard = CatalogSnapshot::fresh(items);
        Ok(guard.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted source: pops one pre-canned response per fetch.
    struct StubSource {
        responses: Mutex<VecDeque<Result<Vec<Product>, CatalogError>>>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(responses: Vec<Result<Vec<Product>, CatalogError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ProductSource for StubSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .expect("stub lock")
                .pop_front()
                .unwrap_or_else(|| Err(CatalogError::Decode("stub exhausted".into())))
        }
    }

    fn product(title: &str) -> Product {
        Product {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn valid_snapshot_is_served_without_fetching() {
        let seeded = CatalogSnapshot::fresh(vec![product("a"), product("b")]);
        let cache = CatalogCache::with_snapshot(StubSource::new(Vec::new()), seeded);

        let items = cache.get().await.expect("cache hit");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title_text(), "a");
        assert_eq!(items[1].title_text(), "b");
        assert_eq!(cache.source().calls(), 0);
    }

    #[tokio::test]
    async fn empty_snapshot_always_triggers_a_fetch() {
        // Fresh but empty: never valid, so the source must be consulted.
        let seeded = CatalogSnapshot::fresh(Vec::new());
        let cache = CatalogCache::with_snapshot(
            StubSource::new(vec![Ok(vec![product("a")])]),
            seeded,
        );

        let items = cache.get().await.expect("refetched");
        assert_eq!(items.len(), 1);
        assert_eq!(cache.source().calls(), 1);
    }

    #[tokio::test]
    async fn second_request_within_ttl_hits_the_cache() {
        let cache = CatalogCache::new(StubSource::new(vec![Ok(vec![product("a")])]));

        cache.get().await.expect("first fetch");
        cache.get().await.expect("served from snapshot");
        assert_eq!(cache.source().calls(), 1);
    }

    #[tokio::test]
    async fn expired_snapshot_is_refreshed_once() {
        let expired = CatalogSnapshot::with_ttl(vec![product("old")], Duration::ZERO);
        let cache = CatalogCache::with_snapshot(
            StubSource::new(vec![Ok(vec![product("new"), product("newer")])]),
            expired,
        );

        let items = cache.get().await.expect("refreshed");
        assert_eq!(items[0].title_text(), "new");
        assert_eq!(cache.source().calls(), 1);

        // The replacement snapshot is fresh: no further upstream call.
        cache.get().await.expect("hit");
        assert_eq!(cache.source().calls(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_is_not_masked_by_a_stale_snapshot() {
        let stale = CatalogSnapshot::with_ttl(vec![product("old")], Duration::ZERO);
        let cache = CatalogCache::with_snapshot(
            StubSource::new(vec![Err(CatalogError::Decode("boom".into()))]),
            stale,
        );

        let err = cache.get().await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
        assert_eq!(cache.source().calls(), 1);

        // The failed fetch must not have replaced the previous snapshot.
        assert_eq!(cache.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn upstream_order_is_preserved() {
        let cache = CatalogCache::new(StubSource::new(vec![Ok(vec![
            product("zebra"),
            product("apple"),
            product("mango"),
        ])]));

        let items = cache.get().await.expect("fetched");
        let titles: Vec<_> = items.iter().map(|p| p.title_text()).collect();
        assert_eq!(titles, ["zebra", "apple", "mango"]);
    }

    #[tokio::test]
    async fn refresh_bypasses_the_ttl_gate() {
        let seeded = CatalogSnapshot::fresh(vec![product("cached")]);
        let cache = CatalogCache::with_snapshot(
            StubSource::new(vec![Ok(vec![product("replaced")])]),
            seeded,
        );

        let items = cache.refresh().await.expect("forced refresh");
        assert_eq!(items[0].title_text(), "replaced");
        assert_eq!(cache.source().calls(), 1);
    }
}
