//! Collaboration negotiation flows.

pub mod service;

pub use service::{CollaborationService, CreateCollaborationInput, Participant};
