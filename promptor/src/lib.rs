//! Catalog-grounded prompt pipeline with a single public function.
//!
//! Public API: [`answer`]. It reads the shared catalog snapshot (refreshing
//! it when stale), renders the bounded prompt, calls the generation engine,
//! and assembles the final answer together with its token estimate. There is
//! no partial success: either every step succeeds, or the error propagates
//! untouched to the caller.

mod api_types;
mod error;
pub mod prompt;

pub use api_types::{AssistAnswer, TOKENS_PER_WORD, estimate_tokens};
pub use error::AssistError;

use ai_llm_service::TextGenerator;
use catalog_store::{CatalogCache, ProductSource};
use tracing::debug;

/// Runs the full pipeline for one user query.
///
/// Both collaborators come in through seams ([`ProductSource`] behind the
/// cache, [`TextGenerator`] for the engine) so the pipeline is testable
/// without any network.
///
/// # Errors
/// - [`AssistError::Catalog`] when the snapshot is stale/empty and the
///   upstream fetch fails (stale items are never served as a fallback)
/// - [`AssistError::Generation`] when the engine call fails
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use ai_llm_service::GenerationService;
/// # use catalog_store::{CatalogCache, HttpCatalogSource};
/// # async fn run(cache: Arc<CatalogCache<HttpCatalogSource>>, engine: Arc<GenerationService>) {
/// let answer = promptor::answer(cache.as_ref(), engine.as_ref(), "Show me cheap shoes")
///     .await
///     .unwrap();
/// println!("{} ({} products)", answer.reply, answer.products_used);
/// # }
/// ```
pub async fn answer<S, G>(
    cache: &CatalogCache<S>,
    engine: &G,
    query: &str,
) -> Result<AssistAnswer, AssistError>
where
    S: ProductSource,
    G: TextGenerator,
{
    // 1) Catalog snapshot: cache hit or ttl-gated refresh.
    let products = cache.get().await?;
    debug!(products = products.len(), "catalog context ready");

    // 2) Bounded prompt from query + catalog.
    let prompt = prompt::build_prompt(query, &products);

    // 3) Generation engine call; limits are applied out-of-band by its config.
    let reply = engine.generate(&prompt).await?;

    // 4) Assemble the response data.
    let estimated_tokens = api_types::estimate_tokens(&reply);
    debug!(estimated_tokens, "assistant reply assembled");

    Ok(AssistAnswer {
        reply,
        estimated_tokens,
        products_used: products.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use ai_llm_service::AiLlmError;
    use ai_llm_service::error_handler::{Provider, ProviderError, ProviderErrorKind};
    use catalog_store::{CatalogError, CatalogSnapshot, Product};
    use serde_json::json;

    struct StaticSource(Vec<Product>);

    impl ProductSource for StaticSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl ProductSource for FailingSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Decode("catalog down".into()))
        }
    }

    struct StubEngine {
        prompts: Mutex<Vec<String>>,
        reply: Result<&'static str, ()>,
    }

    impl StubEngine {
        fn replying(reply: &'static str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Ok(reply),
            }
        }

        fn failing() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Err(()),
            }
        }
    }

    impl TextGenerator for StubEngine {
        async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
            self.prompts.lock().expect("stub lock").push(prompt.to_string());
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(ProviderError::new(
                    Provider::Ollama,
                    ProviderErrorKind::EmptyChoices,
                )
                .into()),
            }
        }
    }

    fn product(v: serde_json::Value) -> Product {
        serde_json::from_value(v).expect("product record")
    }

    #[tokio::test]
    async fn cheap_shoes_end_to_end() {
        let sneaker = product(json!({ "title": "Sneaker", "price": 20 }));
        let cache = CatalogCache::with_snapshot(
            StaticSource(Vec::new()),
            CatalogSnapshot::fresh(vec![sneaker]),
        );
        let engine = StubEngine::replying("- Sneaker (20): the budget pick.");

        let got = answer(&cache, &engine, "Show me cheap shoes")
            .await
            .expect("pipeline succeeds");

        assert!(!got.reply.is_empty());
        assert_eq!(got.products_used, 1);
        assert!(got.estimated_tokens > 0);

        let prompts = engine.prompts.lock().expect("stub lock");
        assert!(prompts[0].contains("Show me cheap shoes"));
        assert!(prompts[0].contains("Title: Sneaker"));
        assert!(prompts[0].contains("Price: 20"));
    }

    #[tokio::test]
    async fn catalog_failure_propagates_and_skips_generation() {
        let cache = CatalogCache::new(FailingSource);
        let engine = StubEngine::replying("never used");

        let err = answer(&cache, &engine, "anything").await.unwrap_err();
        assert!(matches!(err, AssistError::Catalog(_)));
        assert!(engine.prompts.lock().expect("stub lock").is_empty());
    }

    #[tokio::test]
    async fn generation_failure_propagates() {
        let cache = CatalogCache::with_snapshot(
            StaticSource(Vec::new()),
            CatalogSnapshot::fresh(vec![product(json!({ "title": "Lamp" }))]),
        );
        let engine = StubEngine::failing();

        let err = answer(&cache, &engine, "lamps?").await.unwrap_err();
        assert!(matches!(err, AssistError::Generation(_)));
    }
}
