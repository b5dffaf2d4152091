use crate::config::llm_provider::LlmProvider;

/// Configuration for a generation-engine invocation.
///
/// This struct contains both general and provider-specific parameters. The
/// assistant builds exactly one of these at startup (see
/// [`crate::config::default_config`]); the generation limits inside it are
/// fixed constants, not request-derived values.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Ollama,
///     model: "qwen3:14b".to_string(),
///     endpoint: "http://localhost:11434".to_string(),
///     api_key: None,
///     max_tokens: Some(150),
///     temperature: Some(0.7),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.provider, LlmProvider::Ollama);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The generation provider/backend (e.g., Ollama, OpenAI).
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"gpt-4o-mini"`, `"qwen3:14b"`).
    pub model: String,

    /// Inference endpoint (local server or remote API URL).
    pub endpoint: String,

    /// Optional API key for authentication (e.g., OpenAI).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
