//! Entity models for the StayLink domain.
//!
//! Each module mirrors a table (or a small family of tables) in one of the
//! two relational stores. Rows are mapped with `sqlx::FromRow`; enum columns
//! use Postgres enum types via `sqlx::Type`.

pub mod chat;
pub mod collaboration;
pub mod consent;
pub mod gdpr;
pub mod profile;
pub mod token;
pub mod user;
