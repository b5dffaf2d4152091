//! Thin per-provider clients for the supported generation backends.

pub mod ollama_service;
pub mod open_ai_service;
