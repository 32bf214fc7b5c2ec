//! Request extractors.

pub mod auth;
pub mod meta;

pub use auth::{AuthUserAllowPending, Bearer, OptionalUserId};
pub use meta::ClientMetaExt;
