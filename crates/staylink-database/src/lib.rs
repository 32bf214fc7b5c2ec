//! Database access for StayLink.
//!
//! Owns the two PostgreSQL pools (business store and auth store) and the
//! repositories over them. Repositories never leak `sqlx::Error`; every
//! failure is mapped into [`staylink_core::AppError`].

pub mod connection;
pub mod patch;
pub mod repositories;

pub use connection::StorePools;
