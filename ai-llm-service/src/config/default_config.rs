//! Assistant LLM config loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by provider. The assistant uses exactly one generation profile;
//! its output ceiling and sampling temperature are the fixed constants below
//! and are never derived from request content.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND` = provider kind (`ollama` (default) or `openai`)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = model (mandatory)
//!
//! OpenAI-specific:
//! - `OPENAI_API_KEY` = API key (mandatory)
//! - `OPENAI_URL`     = API base (default `https://api.openai.com`)
//! - `OPENAI_MODEL`   = model (default `gpt-4o-mini`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, must_env, validate_http_endpoint},
};

/// Fixed output ceiling for assistant answers, in engine tokens.
pub const ASSISTANT_MAX_TOKENS: u32 = 150;

/// Fixed sampling temperature for assistant answers.
pub const ASSISTANT_TEMPERATURE: f32 = 0.7;

/// Default request timeout for generation calls, in seconds.
pub const ASSISTANT_TIMEOUT_SECS: u64 = 60;

/// Builds the assistant generation config for the provider named by
/// `LLM_KIND` (defaulting to Ollama).
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - provider-specific constructor errors below
pub fn assistant_config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    let kind = std::env::var("LLM_KIND").unwrap_or_else(|_| "ollama".into());
    match LlmProvider::from_kind(&kind) {
        Some(LlmProvider::Ollama) => config_ollama_assistant(),
        Some(LlmProvider::OpenAI) => config_openai_assistant(),
        None => Err(ConfigError::UnsupportedProvider(kind).into()),
    }
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs the assistant config for an **Ollama** engine.
///
/// # Env
/// - `OLLAMA_URL` or `OLLAMA_PORT` (required)
/// - `OLLAMA_MODEL` (required)
pub fn config_ollama_assistant() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens: Some(ASSISTANT_MAX_TOKENS),
        temperature: Some(ASSISTANT_TEMPERATURE),
        top_p: None,
        timeout_secs: Some(ASSISTANT_TIMEOUT_SECS),
    })
}

/// Constructs the assistant config for an **OpenAI** engine.
///
/// # Env
/// - `OPENAI_API_KEY` (required)
/// - `OPENAI_URL` (default `https://api.openai.com`)
/// - `OPENAI_MODEL` (default `gpt-4o-mini`)
pub fn config_openai_assistant() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint =
        std::env::var("OPENAI_URL").unwrap_or_else(|_| "https://api.openai.com".into());
    validate_http_endpoint("OPENAI_URL", &endpoint)?;
    let api_key = must_env("OPENAI_API_KEY")?;
    let model = std::env::var("OPENAI_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "gpt-4o-mini".into());

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(ASSISTANT_MAX_TOKENS),
        temperature: Some(ASSISTANT_TEMPERATURE),
        top_p: None,
        timeout_secs: Some(ASSISTANT_TIMEOUT_SECS),
    })
}
