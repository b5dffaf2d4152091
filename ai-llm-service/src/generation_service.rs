//! Generation façade: one configured engine behind a provider dispatch.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - The prompt is the sole request-time input; limits and sampling come
//!   from the config fixed at startup.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::config::default_config::assistant_config_from_env;
//! use ai_llm_service::generation_service::{GenerationService, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = assistant_config_from_env()?;
//!     let svc = Arc::new(GenerationService::new(cfg)?);
//!
//!     let txt = svc.generate("Recommend a budget laptop.").await?;
//!     println!("{txt}");
//!
//!     let status = svc.health().await;
//!     println!("engine ok = {}", status.ok);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use tracing::debug;

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::AiLlmError;
use crate::health_service::{HealthService, HealthStatus};
use crate::services::{ollama_service::OllamaService, open_ai_service::OpenAiService};

/// The injectable engine seam: anything that turns a finished prompt into
/// plain text. Request pipelines are generic over this trait so tests can
/// swap in a scripted generator.
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, AiLlmError>> + Send;
}

/// The concrete client constructed for the configured provider.
enum ProviderClient {
    Ollama(OllamaService),
    OpenAi(OpenAiService),
}

/// Shared service owning the engine client and its health prober.
pub struct GenerationService {
    cfg: LlmModelConfig,
    client: ProviderClient,
    health: HealthService,
}

impl GenerationService {
    /// Creates the service for `cfg`, building the provider client eagerly so
    /// misconfiguration fails at startup rather than on the first request.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the provider client or the health prober
    /// cannot be built.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let client = match cfg.provider {
            LlmProvider::Ollama => ProviderClient::Ollama(OllamaService::new(cfg.clone())?),
            LlmProvider::OpenAI => ProviderClient::OpenAi(OpenAiService::new(cfg.clone())?),
        };
        let health = HealthService::new(cfg.timeout_secs)?;

        Ok(Self {
            cfg,
            client,
            health,
        })
    }

    /// Health snapshot for the configured engine. Never fails; failures are
    /// folded into `HealthStatus { ok: false, .. }`.
    pub async fn health(&self) -> HealthStatus {
        self.health.check(&self.cfg).await
    }

    /// The active engine config.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }
}

impl TextGenerator for GenerationService {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        debug!(
            provider = ?self.cfg.provider,
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "dispatching generation request"
        );
        match &self.client {
            ProviderClient::Ollama(cli) => cli.generate(prompt).await,
            ProviderClient::OpenAi(cli) => cli.generate(prompt, None).await,
        }
    }
}
