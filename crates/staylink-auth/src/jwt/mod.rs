//! Stateless signed session tokens.

pub mod claims;
pub mod issuer;

pub use claims::Claims;
pub use issuer::{IssuedToken, TokenError, TokenIssuer};
