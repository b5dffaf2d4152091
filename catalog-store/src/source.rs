//! Upstream catalog source: injectable seam plus the HTTP implementation.
//!
//! The HTTP client follows the conventions of the generation-engine clients:
//! validated http(s) endpoint, bounded timeout, non-2xx statuses reported
//! with a body snippet, JSON decoded through `serde_json`.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::error::CatalogError;
use crate::product::Product;

/// Where products come from.
///
/// [`crate::CatalogCache`] is generic over this seam so unit tests can inject
/// a scripted source instead of a live endpoint.
pub trait ProductSource: Send + Sync {
    /// Fetch the full product list from the upstream.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// HTTP GET source for the configured catalog endpoint.
///
/// Reuses one `reqwest::Client` with a default 10 s timeout — the upstream
/// contract specifies none, so a sane bound is applied here.
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Creates a source for `url`, optionally overriding the timeout.
    ///
    /// # Errors
    /// - [`CatalogError::InvalidEndpoint`] if `url` is empty or not http(s)
    /// - [`CatalogError::Transport`] if the HTTP client cannot be built
    pub fn new(url: impl Into<String>, timeout_secs: Option<u64>) -> Result<Self, CatalogError> {
        let url = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty()
            || !(trimmed.starts_with("http://") || trimmed.starts_with("https://"))
        {
            return Err(CatalogError::InvalidEndpoint(url));
        }

        let timeout = Duration::from_secs(timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: trimmed.to_string(),
        })
    }

    #[instrument(skip_all, fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        debug!("GET {}", self.url);
        let resp = self.client.get(&self.url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = text.chars().take(240).collect::<String>();
            error!(%status, %snippet, "catalog upstream returned non-success status");
            return Err(CatalogError::HttpStatus {
                status,
                url: self.url.clone(),
                snippet,
            });
        }

        let payload: Value = resp
            .json()
            .await
            .map_err(|e| CatalogError::Decode(format!("invalid JSON body: {e}")))?;

        locate_products(payload)
    }
}

impl ProductSource for HttpCatalogSource {
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        self.fetch()
    }
}

/// Field names probed for the product list, in priority order.
const LIST_FIELDS: [&str; 3] = ["content", "items", "products"];

/// Locates and decodes the product list inside an upstream payload.
///
/// The first of `content`, `items`, `products` that exists is the candidate —
/// even when its value is not an array. With none of them present the whole
/// payload is the candidate. A non-array candidate is a shape error, not a
/// fallthrough to the next field.
pub(crate) fn locate_products(payload: Value) -> Result<Vec<Product>, CatalogError> {
    let (candidate, location) = match payload {
        Value::Object(mut map) => match LIST_FIELDS.iter().find(|f| map.contains_key(**f)) {
            Some(field) => (map.remove(*field).unwrap_or(Value::Null), *field),
            None => (Value::Object(map), "payload"),
        },
        other => (other, "payload"),
    };

    let Value::Array(raw) = candidate else {
        return Err(CatalogError::NotAnArray { location });
    };

    raw.into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| CatalogError::Decode(format!("invalid product record: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titles(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.title_text()).collect()
    }

    #[test]
    fn content_field_wins_over_later_fields() {
        let got = locate_products(json!({
            "content": [{ "title": "a" }],
            "items": [{ "title": "b" }],
            "products": [{ "title": "c" }]
        }))
        .expect("list located");
        assert_eq!(titles(&got), ["a"]);
    }

    #[test]
    fn items_field_wins_over_products() {
        let got = locate_products(json!({
            "items": [{ "title": "b" }],
            "products": [{ "title": "c" }]
        }))
        .expect("list located");
        assert_eq!(titles(&got), ["b"]);
    }

    #[test]
    fn products_field_is_probed_last() {
        let got = locate_products(json!({ "products": [{ "title": "c" }] })).expect("list located");
        assert_eq!(titles(&got), ["c"]);
    }

    #[test]
    fn bare_array_payload_is_the_list() {
        let got = locate_products(json!([{ "title": "a" }, { "title": "b" }])).expect("list");
        assert_eq!(titles(&got), ["a", "b"]);
    }

    #[test]
    fn first_existing_field_is_used_even_when_not_an_array() {
        // `items` holds a valid list, but `content` exists and wins the probe.
        let err = locate_products(json!({
            "content": "not a list",
            "items": [{ "title": "b" }]
        }))
        .unwrap_err();
        assert!(matches!(err, CatalogError::NotAnArray { location: "content" }));
    }

    #[test]
    fn object_without_known_fields_is_a_shape_error() {
        let err = locate_products(json!({ "data": [] })).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnArray { location: "payload" }));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        assert!(matches!(
            HttpCatalogSource::new("ftp://catalog.internal/items", None),
            Err(CatalogError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            HttpCatalogSource::new("   ", None),
            Err(CatalogError::InvalidEndpoint(_))
        ));
    }
}
