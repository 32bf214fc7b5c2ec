//! Core crate for StayLink — configuration, errors, and shared types.
//!
//! Nothing in this crate performs I/O; it exists so that every other crate
//! can share one error type and one configuration schema.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
