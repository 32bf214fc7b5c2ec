//! Consent state and audit flows.

pub mod service;

pub use service::{ConsentService, ConsentStatus, record_consent_best_effort};
