use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::content::schema::ValidationError;
use crate::error::AppError;

/// Errors a handler can return. Each maps to one status code and a JSON body
/// of the form `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The provider failed. `message` is what the caller sees; `source` is
    /// only logged.
    #[error("{message}: {source}")]
    Provider {
        message: String,
        #[source]
        source: AppError,
    },
}

impl ApiError {
    /// Wraps a provider failure as `Failed to <action>`.
    pub fn provider(action: impl AsRef<str>, source: AppError) -> Self {
        Self::Provider {
            message: format!("Failed to {}", action.as_ref()),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Provider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(e) => json!({
                "error": "Validation failed",
                "details": e.violations,
            }),
            ApiError::Provider { message, source } => {
                error!("{message}: {source}");
                json!({ "error": message })
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg) => json!({ "error": msg }),
        };
        (status, Json(body)).into_response()
    }
}
