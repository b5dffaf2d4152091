//! POST /assist — answers a shopping question with catalog context.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::assist::assist_request::{AssistRequest, AssistResponse},
};

/// Handler: POST /assist
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/assist \
///   -H 'content-type: application/json' \
///   -d '{"prompt":"Show me cheap shoes"}'
/// ```
pub async fn assist(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AssistRequest>,
) -> AppResult<Json<AssistResponse>> {
    let query = body.prompt.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest(
            "`prompt` must be a non-empty string".into(),
        ));
    }

    // Delegate to promptor (catalog snapshot + prompt + generation)
    let answer = promptor::answer(state.cache.as_ref(), state.engine.as_ref(), query).await?;

    Ok(Json(AssistResponse::from(answer)))
}
