//! Account lifecycle flows — registration, login, password reset, and
//! email verification.

pub mod service;

pub use service::{AccountService, AuthOutcome, RegisterInput, TokenValidation};
