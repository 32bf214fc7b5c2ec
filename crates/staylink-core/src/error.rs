//! Unified application error types for StayLink.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The HTTP layer maps each
//! [`ErrorKind`] to a status code exactly once.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (missing, expired, or malformed token; bad credentials).
    Authentication,
    /// The caller is authenticated but not allowed to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate email, duplicate active request, etc.).
    Conflict,
    /// The resource existed but is no longer available (expired download link).
    Gone,
    /// The request was accepted but the result is not ready yet.
    Processing,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An external service (email delivery) failed.
    ExternalService,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Gone => write!(f, "GONE"),
            Self::Processing => write!(f, "PROCESSING"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout StayLink.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a gone error.
    pub fn gone(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Gone, message)
    }

    /// Create a still-processing error.
    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Processing, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Standard API error response body.
///
/// Lives here (the crate that owns [`AppError`]) rather than in the API crate
/// because the orphan rule forbids implementing the foreign `IntoResponse`
/// trait for the foreign `AppError` type outside of `AppError`'s home crate.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.message),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", self.message),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN", self.message),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", self.message),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", self.message),
            ErrorKind::Gone => (StatusCode::GONE, "GONE", self.message),
            ErrorKind::Processing => (StatusCode::ACCEPTED, "PROCESSING", self.message),
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::ExternalService
            | ErrorKind::Internal => {
                tracing::error!(kind = %self.kind, error = %self.message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Authentication.to_string(), "AUTHENTICATION");
        assert_eq!(ErrorKind::Gone.to_string(), "GONE");
    }

    #[test]
    fn test_helpers_set_kind() {
        assert_eq!(AppError::conflict("dup").kind, ErrorKind::Conflict);
        assert_eq!(AppError::processing("wait").kind, ErrorKind::Processing);
        assert_eq!(AppError::validation("bad").message, "bad");
    }
}
