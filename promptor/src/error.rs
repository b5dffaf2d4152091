//! Typed error for the promptor crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistError {
    /// Errors from the catalog cache/fetch layer.
    #[error("catalog error: {0}")]
    Catalog(#[from] catalog_store::CatalogError),

    /// Errors from the generation engine.
    #[error("generation error: {0}")]
    Generation(#[from] ai_llm_service::AiLlmError),
}
