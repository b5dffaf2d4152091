//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the
//! whole library and groups domain-specific errors in nested types
//! ([`ConfigError`], [`ProviderError`]). Small helpers for reading/validating
//! environment variables return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution
//! in logs.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
///
/// Variants wrap domain-specific types (config/provider) plus the common
/// transport case. Prefer adding new sub-types for distinct domains instead
/// of growing this enum indefinitely.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider-attributed request/decoding errors.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u16`).
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_KIND`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `OLLAMA_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Which backend an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Local Ollama runtime.
    Ollama,
    /// OpenAI REST API.
    OpenAI,
}

/// Provider-attributed error: which backend failed, and how.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider:?}: {kind}")]
pub struct ProviderError {
    /// The backend the failed request targeted.
    pub provider: Provider,
    /// What went wrong.
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    /// Convenience constructor used by the service clients.
    pub fn new(provider: Provider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

/// Failure modes shared by all provider clients.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    /// The config names a different provider than this client serves.
    #[error("invalid provider for this client")]
    InvalidProvider,

    /// The provider requires an API key and none was configured.
    #[error("missing API key")]
    MissingApiKey,

    /// Invalid endpoint (empty or missing http/https).
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Non-successful HTTP status from upstream.
    #[error("unexpected HTTP status: {0}")]
    HttpStatus(HttpError),

    /// Unexpected/invalid JSON response.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The completion response carried no usable choice.
    #[error("no choices in completion response")]
    EmptyChoices,
}

/// Status + URL + body snippet of a failed upstream call.
#[derive(Debug)]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// Clamps an upstream body to a log-friendly snippet.
pub fn make_snippet(text: &str) -> String {
    text.chars().take(240).collect::<String>().trim().to_string()
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::MissingVar`] if the
/// variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::InvalidFormat`] when
/// the string does not start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_clamped_and_trimmed() {
        let long = format!("  {}  ", "x".repeat(500));
        let snippet = make_snippet(&long);
        assert!(snippet.len() <= 240);
        assert!(!snippet.starts_with(' '));
    }

    #[test]
    fn endpoint_validation_requires_http_scheme() {
        assert!(validate_http_endpoint("OLLAMA_URL", "http://localhost:11434").is_ok());
        assert!(validate_http_endpoint("OLLAMA_URL", "https://llm.internal").is_ok());
        assert!(validate_http_endpoint("OLLAMA_URL", "localhost:11434").is_err());
    }

    #[test]
    fn provider_error_message_names_the_backend() {
        let err = ProviderError::new(Provider::Ollama, ProviderErrorKind::EmptyChoices);
        assert!(err.to_string().contains("Ollama"));
    }
}
