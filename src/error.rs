//! Unified error handling for ssidd.
//!
//! Every failure a request can hit ends up as an [`ApiError`], which maps to
//! a fixed status code and a `{"error": "..."}` body. Store diagnostics are
//! logged here and never reach the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

/// Errors that terminate a request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("SSID is required")]
    MissingSsid,

    #[error("Request body too large")]
    BodyTooLarge,

    #[error("Database connection failed")]
    Connection(#[source] DbError),

    #[error("Failed to create SSID")]
    Write(#[source] DbError),

    #[error("Failed to retrieve SSIDs")]
    Read(#[source] DbError),
}

impl ApiError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::MissingSsid => "missing_ssid",
            Self::BodyTooLarge => "body_too_large",
            Self::Connection(_) => "connection_failed",
            Self::Write(_) => "write_failed",
            Self::Read(_) => "read_failed",
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MissingSsid => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Connection(_) | Self::Write(_) | Self::Read(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The underlying store error, if any.
    fn store_error(&self) -> Option<&DbError> {
        match self {
            Self::Connection(e) | Self::Write(e) | Self::Read(e) => Some(e),
            Self::Unauthorized | Self::MissingSsid | Self::BodyTooLarge => None,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.store_error() {
            Some(cause) => {
                tracing::error!(code = self.error_code(), error = %cause, "{}", self)
            }
            None => tracing::debug!(code = self.error_code(), "Request rejected: {}", self),
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
