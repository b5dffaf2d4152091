//! Configuration types and env-driven constructors for the generation engine.

pub mod default_config;
pub mod llm_model_config;
pub mod llm_provider;
