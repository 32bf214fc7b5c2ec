//! Collaboration chat entities.

pub mod model;

pub use model::{ChatMessage, MessageAuthor};
