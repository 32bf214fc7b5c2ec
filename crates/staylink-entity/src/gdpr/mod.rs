//! GDPR data-subject-rights request entities.

pub mod model;

pub use model::{GdprRequest, GdprRequestStatus, GdprRequestType};
