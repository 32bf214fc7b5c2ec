//! Consent audit and cookie consent entities.

pub mod model;

pub use model::{ConsentRecord, ConsentType, CookieConsent, NewConsentRecord};
