//! Unified error handling
//!
//! Application error type and response envelope shared by every handler:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error code scheme
//!
//! | Code  | Category          | HTTP |
//! |-------|-------------------|------|
//! | E0002 | Validation        | 400  |
//! | E0003 | Not found         | 404  |
//! | E0007 | Request cancelled | 400  |
//! | E8001 | Upstream source   | 503  |
//! | E9001 | Internal          | 500  |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

/// API response envelope
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 means success)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request input failed validation (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Requested resource does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Caller abandoned the request before results were ready (400)
    #[error("Request cancelled")]
    Cancelled,

    /// Every record source failed; the caller may retry (503)
    #[error("Record source unavailable: {0}")]
    Upstream(String),

    /// Unexpected internal failure (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller can reasonably retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Upstream(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),
            AppError::Cancelled => (StatusCode::BAD_REQUEST, "E0007", "Request cancelled"),
            AppError::Upstream(msg) => {
                error!(target: "source", error = %msg, "All record sources failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "E8001",
                    "Record source unavailable, please retry",
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}
