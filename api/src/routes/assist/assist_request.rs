use promptor::AssistAnswer;
use serde::{Deserialize, Serialize};

/// Request payload for /assist.
#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    /// Natural-language question; must be non-empty after trimming.
    pub prompt: String,
}

/// Response payload for /assist.
#[derive(Debug, Serialize)]
pub struct AssistResponse {
    /// Final model answer (plain text).
    pub reply: String,
    /// Word-count-based token estimate for the reply.
    pub estimated_tokens: u32,
    /// How many catalog products were in the prompt context.
    pub products_used: usize,
}

impl From<AssistAnswer> for AssistResponse {
    fn from(a: AssistAnswer) -> Self {
        Self {
            reply: a.reply,
            estimated_tokens: a.estimated_tokens,
            products_used: a.products_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_requires_the_prompt_field() {
        assert!(serde_json::from_value::<AssistRequest>(json!({ "prompt": "hi" })).is_ok());
        assert!(serde_json::from_value::<AssistRequest>(json!({})).is_err());
    }

    #[test]
    fn response_serializes_all_fields() {
        let body = serde_json::to_value(AssistResponse {
            reply: "reply".into(),
            estimated_tokens: 4,
            products_used: 2,
        })
        .expect("json");
        assert_eq!(body["reply"], "reply");
        assert_eq!(body["estimated_tokens"], 4);
        assert_eq!(body["products_used"], 2);
    }
}
