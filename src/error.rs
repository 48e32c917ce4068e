//! The single error type returned by services and handlers, and its HTTP
//! rendering.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Everything a request can fail with. [`AppError::status`] fixes the HTTP
/// status per variant; 5xx variants never leak their detail to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Any sqlx failure, including pool acquire timeouts. HTTP 500.
    #[error("Storage failure: {0}")]
    Database(#[from] sqlx::Error),

    /// Missing or malformed input; the message names the field. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// No usable bearer token on a protected route. HTTP 401.
    #[error("Missing bearer token")]
    MissingCredentials,

    /// Login failed. Same message for an unknown identifier and a wrong
    /// password. HTTP 401.
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// A token was presented but failed verification, whatever the reason
    /// (signature, expiry, audience). HTTP 403.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(&'static str),

    /// The code allocator ran out of retries.
    #[error("Unique code allocation exhausted")]
    AllocationExhausted,

    /// A generated code lost the race at insert time. Caught by the allocator's
    /// insert retry loop; only reaches a client if something skips that loop.
    #[error("Generated code already taken")]
    CodeCollision,

    /// A unit of work exceeded its time budget and was rolled back.
    #[error("Unit of work timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MissingCredentials | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AllocationExhausted
            | AppError::CodeCollision
            | AppError::Timeout
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "invalid_request",
            AppError::MissingCredentials => "missing_credentials",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::NotFound(_) => "not_found",
            _ => "internal_error",
        }
    }
}

/// Malformed JSON bodies are validation failures, not 422s.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Body is `{"error": {"code", "message"}}`. 5xx detail is logged here and
/// replaced with a fixed message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            match &self {
                AppError::AllocationExhausted => {
                    tracing::error!("code allocation exhausted; code space may be nearly full")
                }
                other => tracing::error!(error = ?other, "request failed"),
            }
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
