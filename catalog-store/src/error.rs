//! Typed errors for the catalog subsystem.
//!
//! Network failures, bad upstream statuses, JSON decode problems, and shape
//! violations all surface through the single [`CatalogError`] enum; callers
//! decide whether to retry. All messages carry the `[Catalog]` prefix to
//! simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors produced while fetching or decoding the product catalog.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Endpoint is empty or missing an http/https scheme.
    #[error("[Catalog] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error.
    #[error("[Catalog] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream returned a non-successful HTTP status.
    #[error("[Catalog] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Body was not valid JSON, or a record did not fit the product model.
    #[error("[Catalog] failed to decode payload: {0}")]
    Decode(String),

    /// The located product-list candidate is not a JSON array.
    #[error("[Catalog] product list at `{location}` is not an array")]
    NotAnArray {
        /// Field that was probed, or `payload` for the whole body.
        location: &'static str,
    },
}
