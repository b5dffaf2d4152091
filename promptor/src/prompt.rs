//! Prompt builder: fixed instruction frame + rendered catalog section.

use ai_llm_service::config::default_config::ASSISTANT_MAX_TOKENS;
use catalog_store::Product;

/// Word ceiling stated in the instruction frame.
///
/// The engine-token ceiling ([`ASSISTANT_MAX_TOKENS`]) is enforced
/// out-of-band by the generation config; the frame states both so the model
/// aims below the hard cutoff instead of being truncated by it.
pub const MAX_ANSWER_WORDS: usize = 100;

/// Builds the full prompt for one request.
///
/// Pure and infallible: an empty catalog still yields the instruction frame
/// with a zero-product header. Product blocks keep the input order — no
/// sorting, no deduplication — and join with a blank line.
///
/// # Example
/// ```
/// # use promptor::prompt::build_prompt;
/// let prompt = build_prompt("laptops", &[]);
/// assert!(prompt.contains("Catalog (0 products):"));
/// ```
pub fn build_prompt(query: &str, products: &[Product]) -> String {
    let mut out = String::new();
    out.push_str("You are a helpful shopping assistant for an online store.\n\n");

    out.push_str("Customer question:\n");
    out.push_str(query.trim());
    out.push_str("\n\n");

    out.push_str(&format!("Catalog ({} products):\n\n", products.len()));
    let blocks: Vec<String> = products.iter().map(render_product).collect();
    out.push_str(&blocks.join("\n\n"));
    if !products.is_empty() {
        out.push('\n');
    }
    out.push('\n');

    out.push_str(&format!(
        "Answer in at most {MAX_ANSWER_WORDS} words (about {ASSISTANT_MAX_TOKENS} tokens).\n"
    ));
    out.push_str(
        "Use short bullet points and prioritize the products most relevant to the question.\n",
    );

    out
}

/// One fixed-template block per product; placeholders per the product model.
fn render_product(p: &Product) -> String {
    format!(
        "Title: {}\nDescription: {}\nPrice: {}\nCategory: {}",
        p.title_text(),
        p.description_text(),
        p.price_text(),
        p.category_text()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(v: serde_json::Value) -> Product {
        serde_json::from_value(v).expect("product record")
    }

    #[test]
    fn empty_catalog_keeps_the_instruction_frame() {
        let prompt = build_prompt("laptops", &[]);
        assert!(prompt.contains("laptops"));
        assert!(prompt.contains("Catalog (0 products):"));
        assert!(prompt.contains("at most 100 words"));
        assert!(prompt.contains("about 150 tokens"));
        assert!(prompt.contains("bullet points"));
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let prompt = build_prompt("anything", &[product(json!({ "price": 12 }))]);
        assert!(prompt.contains("Title: Unnamed Product"));
        assert!(prompt.contains("Description: No description"));
        assert!(prompt.contains("Price: 12"));
        assert!(prompt.contains("Category: Uncategorized"));
    }

    #[test]
    fn zero_price_renders_as_zero_not_placeholder() {
        let prompt = build_prompt("free stuff", &[product(json!({ "title": "Freebie", "price": 0 }))]);
        assert!(prompt.contains("Price: 0"));
        assert!(!prompt.contains("Price: N/A"));
    }

    #[test]
    fn blocks_keep_input_order_and_blank_line_separation() {
        let items = vec![
            product(json!({ "title": "Zeta", "category": "b" })),
            product(json!({ "title": "Alpha", "category": "a" })),
        ];
        let prompt = build_prompt("q", &items);

        let zeta = prompt.find("Title: Zeta").expect("first block");
        let alpha = prompt.find("Title: Alpha").expect("second block");
        assert!(zeta < alpha, "input order must be preserved");
        assert!(prompt.contains("Category: b\n\nTitle: Alpha"));
    }
}
