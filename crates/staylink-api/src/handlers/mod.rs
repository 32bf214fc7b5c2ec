//! HTTP handlers, organized by domain.

pub mod admin;
pub mod auth;
pub mod collaboration;
pub mod consent;
pub mod gdpr;
pub mod health;

use staylink_core::error::AppError;
use validator::Validate;

/// Run derive-based validation and map failures to a field-level 400.
pub(crate) fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
