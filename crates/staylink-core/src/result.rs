//! Convenience result type alias for StayLink.

use crate::error::AppError;

/// A specialized `Result` type for StayLink operations.
pub type AppResult<T> = Result<T, AppError>;
