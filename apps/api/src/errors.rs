use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend_client::SubmitError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// No backend URL was supplied and none is configured.
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    /// The resume was uploaded but yielded no usable text.
    #[error("{0}")]
    Extraction(String),

    #[error("Request failed: {message}")]
    Transport { message: String, timed_out: bool },

    #[error("Backend error ({status}): {body}")]
    Remote { status: u16, body: String },

    #[error("Request failed: {0}")]
    MalformedResponse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Transport {
                timed_out: true, ..
            } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Transport { .. } | AppError::Remote { .. } | AppError::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Transport {
                timed_out: true, ..
            } => "BACKEND_TIMEOUT",
            AppError::Transport { .. } => "TRANSPORT_ERROR",
            AppError::Remote { .. } => "BACKEND_ERROR",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show the user. Internal details only go to the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Remote { status, body } => AppError::Remote { status, body },
            SubmitError::Malformed(e) => {
                AppError::MalformedResponse(format!("backend response was not valid JSON ({e})"))
            }
            other => AppError::Transport {
                timed_out: other.is_timeout(),
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(code = self.code(), "Request failed: {self}");
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.user_message()
            }
        }));

        (status, body).into_response()
    }
}
