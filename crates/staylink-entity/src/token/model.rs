//! Single-use token models.
//!
//! Three tables back the ledger: `password_reset_tokens` and
//! `email_verification_tokens` (owned by a user id, URL-safe random value)
//! and `email_verification_codes` (owned by a bare email, 6-digit code, so
//! verification can happen before an account exists). Rows are never
//! physically deleted; invalidation flips `used`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserStatus;

/// A user-owned token row joined with its owning user.
///
/// Returned only by validation queries, which already enforce `used = false`,
/// unexpired, and non-suspended owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VerifiedTokenRow {
    /// Token row identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// Owner's email (from the join).
    pub email: String,
    /// Owner's account status (from the join).
    pub status: UserStatus,
}

/// An email verification code row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VerificationCodeRow {
    /// Code row identifier.
    pub id: Uuid,
    /// Email the code was issued for.
    pub email: String,
    /// Code expiry.
    pub expires_at: DateTime<Utc>,
    /// When the code was created.
    pub created_at: DateTime<Utc>,
}
