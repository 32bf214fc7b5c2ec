//! GDPR data-subject-rights flows.

pub mod service;

pub use service::{DeletionOutcome, GdprService};
