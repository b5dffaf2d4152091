//! Product record as received from the catalog source.
//!
//! Upstream records are loosely shaped: every field may be absent or null,
//! and `price` arrives as a number or a string depending on the feed. The
//! accessors substitute a documented placeholder for **missing or null**
//! fields only; legitimately falsy values (`0`, an empty string) are kept
//! as-is.

use serde::Deserialize;
use serde_json::Value;

/// Placeholder shown when a product has no title.
pub const FALLBACK_TITLE: &str = "Unnamed Product";
/// Placeholder shown when a product has no description.
pub const FALLBACK_DESCRIPTION: &str = "No description";
/// Placeholder shown when a product has no price.
pub const FALLBACK_PRICE: &str = "N/A";
/// Placeholder shown when a product has no category.
pub const FALLBACK_CATEGORY: &str = "Uncategorized";

/// A single catalog entry. Unknown upstream fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Kept as raw JSON: feeds send `19.99`, `0`, or `"19.99 EUR"`.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Title, or [`FALLBACK_TITLE`] when missing/null.
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or(FALLBACK_TITLE)
    }

    /// Description, or [`FALLBACK_DESCRIPTION`] when missing/null.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or(FALLBACK_DESCRIPTION)
    }

    /// Price rendered for display.
    ///
    /// Numbers keep their JSON form (`0` stays `0`, not the placeholder),
    /// strings pass through, and missing/null yields [`FALLBACK_PRICE`].
    pub fn price_text(&self) -> String {
        match &self.price {
            None | Some(Value::Null) => FALLBACK_PRICE.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Category, or [`FALLBACK_CATEGORY`] when missing/null.
    pub fn category_text(&self) -> &str {
        self.category.as_deref().unwrap_or(FALLBACK_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> Product {
        serde_json::from_value(v).expect("product record")
    }

    #[test]
    fn full_record_passes_through() {
        let p = parse(json!({
            "title": "Sneaker",
            "description": "Lightweight running shoe",
            "price": 19.99,
            "category": "Shoes",
            "sku": "ignored-extra-field"
        }));
        assert_eq!(p.title_text(), "Sneaker");
        assert_eq!(p.description_text(), "Lightweight running shoe");
        assert_eq!(p.price_text(), "19.99");
        assert_eq!(p.category_text(), "Shoes");
    }

    #[test]
    fn missing_and_null_fields_get_placeholders() {
        let p = parse(json!({ "description": null }));
        assert_eq!(p.title_text(), FALLBACK_TITLE);
        assert_eq!(p.description_text(), FALLBACK_DESCRIPTION);
        assert_eq!(p.price_text(), FALLBACK_PRICE);
        assert_eq!(p.category_text(), FALLBACK_CATEGORY);
    }

    #[test]
    fn zero_price_is_preserved() {
        // Falsy-but-defined values are not conflated with "missing".
        let p = parse(json!({ "title": "Freebie", "price": 0 }));
        assert_eq!(p.price_text(), "0");
    }

    #[test]
    fn string_price_and_empty_title_are_preserved() {
        let p = parse(json!({ "title": "", "price": "19.99 EUR" }));
        assert_eq!(p.title_text(), "");
        assert_eq!(p.price_text(), "19.99 EUR");
    }
}
