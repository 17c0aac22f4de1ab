//! HTTP API error types with consistent JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-facing bodies.
///
/// Every failure is terminal for the current request and surfaces as an
/// HTTP status plus a JSON `message`; upstream diagnostics ride along in
/// an optional `error` field.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The upstream platform answered with a non-2xx status.
    #[error("{message}")]
    UpstreamRejected {
        message: String,
        status: u16,
        detail: Value,
    },

    /// The upstream platform could not be reached at all.
    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UpstreamRejected { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe error message.
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::UpstreamUnavailable(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::MethodNotAllowed => "Method not allowed",
            ApiError::UpstreamRejected { message, .. } => message,
        }
    }

    /// JSON response body.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::UpstreamRejected {
                message,
                status,
                detail,
            } => json!({
                "message": message,
                "error": detail,
                "status_code": status,
            }),
            _ => json!({ "message": self.message() }),
        }
    }
}

// Static constructor methods, so call sites read like the status they produce.
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn upstream_rejected(message: impl Into<String>, status: u16, detail: Value) -> Self {
        ApiError::UpstreamRejected {
            message: message.into(),
            status,
            detail,
        }
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        ApiError::UpstreamUnavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::UpstreamRejected { message, status, .. } => {
                tracing::error!(upstream_status = status, "{message}");
            }
            ApiError::UpstreamUnavailable(message) | ApiError::Internal(message) => {
                tracing::error!("{message}");
            }
            _ => {}
        }

        (self.status_code(), Json(self.to_json())).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
