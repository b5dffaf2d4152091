//! Result DTOs and the token-estimate heuristic.

/// Multiplier turning a whitespace word count into an engine-token estimate.
pub const TOKENS_PER_WORD: f32 = 1.33;

/// Final assembled answer for one request.
#[derive(Debug, Clone)]
pub struct AssistAnswer {
    /// Generated reply, plain text.
    pub reply: String,
    /// Estimated token count of the reply (`words × 1.33`, rounded).
    pub estimated_tokens: u32,
    /// Number of catalog products that were included in the prompt context.
    pub products_used: usize,
}

/// Estimates engine tokens for a piece of text.
///
/// Word-count heuristic, not a tokenizer: good enough for the response
/// envelope, cheap enough to run on every request.
pub fn estimate_tokens(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    (words as f32 * TOKENS_PER_WORD).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_estimates_zero() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("   \n "), 0);
    }

    #[test]
    fn estimate_rounds_words_times_ratio() {
        // 1 word  -> round(1.33) = 1
        assert_eq!(estimate_tokens("hello"), 1);
        // 3 words -> round(3.99) = 4
        assert_eq!(estimate_tokens("one two three"), 4);
        // 100 words -> round(133.0) = 133
        let hundred = vec!["w"; 100].join(" ");
        assert_eq!(estimate_tokens(&hundred), 133);
    }
}
