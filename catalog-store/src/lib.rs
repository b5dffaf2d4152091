//! Product-catalog store: a cached, ttl-gated snapshot of an upstream catalog.
//!
//! One [`CatalogCache`] instance is shared by all requests. A read returns the
//! current snapshot when it is still valid; otherwise the upstream is fetched
//! and the snapshot replaced wholesale. A snapshot with no products is never
//! treated as valid, so the next read always retries the upstream.
//!
//! Public surface:
//! - [`Product`] — tolerant record with placeholder accessors
//! - [`CatalogSnapshot`] — immutable items + fetch timestamp + fixed ttl
//! - [`ProductSource`] / [`HttpCatalogSource`] — injectable upstream seam
//! - [`CatalogCache`] — shared refresh-on-expiry cache

mod cache;
mod error;
mod product;
mod snapshot;
mod source;

pub use cache::CatalogCache;
pub use error::CatalogError;
pub use product::Product;
pub use snapshot::{CATALOG_TTL, CatalogSnapshot};
pub use source::{HttpCatalogSource, ProductSource};
