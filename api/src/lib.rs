//! HTTP surface for the shopping assistant backend.
//!
//! One substantive route (`POST /assist`) plus a health probe. All handlers
//! share one [`core::app_state::AppState`]: the process-wide catalog cache
//! and the configured generation engine.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{assist::assist_route::assist, health::health_route::health};

/// Builds the shared state, binds `API_ADDRESS`, and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").map_err(|_| AppError::MissingEnv("API_ADDRESS"))?;
    let state = Arc::new(AppState::from_env()?);

    let app = Router::new()
        .route("/assist", post(assist))
        .route("/health", get(health))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!("listening on {host_url}");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
