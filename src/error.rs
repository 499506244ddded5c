// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failure of one of the external collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The questionnaire source (Blaise) could not be read.
    #[error("Blaise API error: {0}")]
    Upstream(String),

    /// The credential issuer could not provide a token.
    #[error("Credential error: {0}")]
    Credential(String),

    /// The TO start-date request failed at the transport level.
    #[error("BIMS request failed: {0}")]
    Lookup(String),
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Upstream(msg) => AppError::Upstream(msg),
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_error",
                    Some(msg.clone()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
