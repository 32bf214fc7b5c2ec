//! Repository implementations over the two stores.

pub mod chat;
pub mod collaboration;
pub mod consent;
pub mod gdpr;
pub mod profile;
pub mod token;
pub mod user;
