//! JWT claims embedded in every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use staylink_entity::user::UserRole;

/// Claims payload for a session token.
///
/// `sub` is optional only on the decode side: a token missing its subject is
/// a distinct failure ("invalid token payload") from a malformed token, and
/// that distinction is preserved end-to-end. Issued tokens always carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    #[serde(default)]
    pub sub: Option<Uuid>,
    /// The user's email at issuance time.
    pub email: String,
    /// The user's role at issuance time.
    #[serde(rename = "type")]
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
