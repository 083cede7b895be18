//! Error handling for the Libris HTTP layer
//!
//! [`AppError`] renders the `{"message": ...}` JSON envelope used by the
//! books API. [`TextError`] renders the same outcome as a single plain-text
//! line, which is what the read-books API speaks.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Message returned whenever a request body cannot be decoded.
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Message returned for failures whose details must not leak.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// JSON body of every error response in the enveloped convention
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// `message` is what the client sees; `cause` is only logged.
    #[error("internal error: {message}")]
    Internal { message: String, cause: anyhow::Error },
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an internal error with a client-safe message
    pub fn internal(message: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the client.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation { message }
            | AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message, .. } => message,
        }
    }

    fn log(&self) {
        match self {
            AppError::Internal { message, cause } => {
                let error_id = Uuid::new_v4();
                tracing::error!(
                    error_id = %error_id,
                    error = %format!("{:#}", cause),
                    "{}",
                    message
                );
            }
            other => {
                tracing::debug!(
                    status_code = %other.status().as_u16(),
                    message = other.public_message(),
                    "request rejected"
                );
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "request body rejected");
        AppError::bad_request(INVALID_PAYLOAD)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let body = ErrorBody {
            message: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Plain-text rendering of an [`AppError`]: the message followed by a newline.
#[derive(Debug)]
pub struct TextError(pub AppError);

impl From<AppError> for TextError {
    fn from(err: AppError) -> Self {
        TextError(err)
    }
}

impl From<JsonRejection> for TextError {
    fn from(rejection: JsonRejection) -> Self {
        TextError(AppError::from(rejection))
    }
}

impl IntoResponse for TextError {
    fn into_response(self) -> Response {
        self.0.log();
        let status = self.0.status();
        let body = format!("{}\n", self.0.public_message());
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
