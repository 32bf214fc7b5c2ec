//! Single-use token entities.

pub mod model;

pub use model::{VerificationCodeRow, VerifiedTokenRow};
