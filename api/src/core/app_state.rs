use std::sync::Arc;

use ai_llm_service::{
    AiLlmError, GenerationService, config::default_config::assistant_config_from_env,
};
use catalog_store::{CatalogCache, CatalogError, HttpCatalogSource};
use thiserror::Error;

/// Startup configuration errors, surfaced before the server binds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Llm(#[from] AiLlmError),
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Process-wide product cache; the only shared mutable resource.
    pub cache: Arc<CatalogCache<HttpCatalogSource>>,
    /// Configured generation engine.
    pub engine: Arc<GenerationService>,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// # Env
    /// - `CATALOG_URL` (required) — product catalog endpoint
    /// - `CATALOG_TIMEOUT_SECS` (optional; default 10)
    /// - engine variables per [`ai_llm_service::config::default_config`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let catalog_url =
            std::env::var("CATALOG_URL").map_err(|_| ConfigError::MissingVar("CATALOG_URL"))?;

        let catalog_timeout = match std::env::var("CATALOG_TIMEOUT_SECS") {
            Ok(v) if !v.trim().is_empty() => {
                Some(v.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                    var: "CATALOG_TIMEOUT_SECS",
                    reason: "expected u64",
                })?)
            }
            _ => None,
        };

        let source = HttpCatalogSource::new(catalog_url, catalog_timeout)?;
        let engine = GenerationService::new(assistant_config_from_env()?)?;

        Ok(Self {
            cache: Arc::new(CatalogCache::new(source)),
            engine: Arc::new(engine),
        })
    }
}
