//! Generation-engine service shared by the assistant backend.
//!
//! Wraps the supported text-generation providers (Ollama, OpenAI) behind one
//! façade, [`GenerationService`], configured once from the environment and
//! invoked with a finished prompt. Generation limits (max output tokens,
//! sampling temperature) are fixed constants applied out-of-band; they are
//! never derived from the prompt content.

pub mod config;
pub mod error_handler;
pub mod generation_service;
pub mod health_service;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::AiLlmError;
pub use generation_service::{GenerationService, TextGenerator};
pub use health_service::HealthStatus;
