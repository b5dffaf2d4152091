use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use promptor::AssistError;
use serde::Serialize;
use thiserror::Error;

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only
            AppError::MissingEnv(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingEnv(_) => "MISSING_ENV",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert pipeline failures to `AppError::Http` with precise status & code.
/// The policy is uniform: any upstream failure (catalog or engine) is a
/// gateway error carrying the underlying message, never a partial answer.
impl From<AssistError> for AppError {
    fn from(err: AssistError) -> Self {
        match err {
            AssistError::Catalog(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "CATALOG_FETCH_FAILED",
                message: e.to_string(),
            },
            AssistError::Generation(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "GENERATION_FAILED",
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_store::CatalogError;

    #[test]
    fn validation_errors_are_client_errors() {
        let err = AppError::BadRequest("`prompt` must be a non-empty string".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }

    #[test]
    fn catalog_failures_map_to_bad_gateway() {
        let err = AppError::from(AssistError::Catalog(CatalogError::Decode("boom".into())));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "CATALOG_FETCH_FAILED");
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn generation_failures_map_to_bad_gateway() {
        let err = AppError::from(AssistError::Generation(
            ai_llm_service::error_handler::ProviderError::new(
                ai_llm_service::error_handler::Provider::Ollama,
                ai_llm_service::error_handler::ProviderErrorKind::EmptyChoices,
            )
            .into(),
        ));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "GENERATION_FAILED");
    }
}
