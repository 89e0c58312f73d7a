//! API error type and its HTTP mapping.
//!
//! [`ApiError`] is the unified error type for all endpoints. Every variant
//! maps to HTTP 500 with a JSON body `{"message": "<error text>"}`. Clients
//! rely on that single shape, so bad input and store failures are not told
//! apart by status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use recipod_core::CoreError;
use recipod_skill::SkillError;
use recipod_storage::StorageError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body is not the JSON the endpoint expects.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// The store call failed or timed out.
    #[error("{0}")]
    Store(#[from] StorageError),

    /// Converting a payload into a store document failed.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// The intent resolver failed.
    #[error("{0}")]
    Skill(#[from] SkillError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::warn!(error = %message, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(ErrorBody { message }),
        )
            .into_response()
    }
}
