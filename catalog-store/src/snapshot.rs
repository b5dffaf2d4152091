//! Cached view of the product catalog with a staleness deadline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::product::Product;

/// Fixed staleness window. Every successful fetch resets the snapshot to this
/// ttl; it is not configurable per fetch.
pub const CATALOG_TTL: Duration = Duration::from_secs(10 * 60);

/// Immutable catalog view plus its fetch timestamp and ttl.
///
/// Replaced wholesale on every successful fetch; never mutated field by
/// field. A snapshot is **valid** iff it holds at least one product and is
/// younger than its ttl — an empty snapshot is never valid, regardless of
/// age, which forces the next read to retry the upstream.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    items: Arc<[Product]>,
    fetched_at: Option<Instant>,
    ttl: Duration,
}

impl CatalogSnapshot {
    /// The process-start snapshot: no items, no fetch timestamp.
    pub fn empty() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            fetched_at: None,
            ttl: CATALOG_TTL,
        }
    }

    /// Snapshot stamped with the current time, as produced by a fetch.
    pub fn fresh(items: Vec<Product>) -> Self {
        Self {
            items: Arc::from(items),
            fetched_at: Some(Instant::now()),
            ttl: CATALOG_TTL,
        }
    }

    /// Fresh snapshot with an overridden ttl. Test seam for expiry paths.
    #[cfg(test)]
    pub(crate) fn with_ttl(items: Vec<Product>, ttl: Duration) -> Self {
        Self {
            items: Arc::from(items),
            fetched_at: Some(Instant::now()),
            ttl,
        }
    }

    /// Shared handle to the stored items, in upstream order.
    pub fn items(&self) -> Arc<[Product]> {
        self.items.clone()
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot holds no products.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validity per the snapshot invariant: non-empty and younger than ttl.
    pub fn is_valid(&self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        match self.fetched_at {
            Some(at) => Instant::now().duration_since(at) < self.ttl,
            None => false,
        }
    }

    /// Items when the snapshot is valid, `None` when a refresh is due.
    pub(crate) fn fresh_items(&self) -> Option<Arc<[Product]>> {
        if self.is_valid() {
            Some(self.items.clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str) -> Product {
        Product {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn initial_snapshot_is_invalid() {
        assert!(!CatalogSnapshot::empty().is_valid());
    }

    #[test]
    fn fresh_nonempty_snapshot_is_valid() {
        let snap = CatalogSnapshot::fresh(vec![product("a")]);
        assert!(snap.is_valid());
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn empty_items_are_never_valid_even_when_fresh() {
        assert!(!CatalogSnapshot::fresh(Vec::new()).is_valid());
    }

    #[test]
    fn expired_snapshot_is_invalid() {
        let snap = CatalogSnapshot::with_ttl(vec![product("a")], Duration::ZERO);
        assert!(!snap.is_valid());
    }
}
