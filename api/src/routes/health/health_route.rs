//! GET /health — generation-engine reachability probe.

use std::sync::Arc;

use ai_llm_service::HealthStatus;
use axum::{Json, extract::State};

use crate::core::app_state::AppState;

/// Handler: GET /health
///
/// Always answers 200; failures are folded into the status body
/// (`ok = false`) so monitors can distinguish "API up, engine down".
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(state.engine.health().await)
}
