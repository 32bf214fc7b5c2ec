//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;
use super::status::UserStatus;

/// A registered user in the StayLink auth store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address. Stored as given; looked up lower-cased. Globally unique.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Marketplace role.
    pub role: UserRole,
    /// Account lifecycle status.
    pub status: UserStatus,
    /// Whether the email address has been confirmed.
    pub email_verified: bool,
    /// When Terms of Service were accepted.
    pub terms_accepted_at: Option<DateTime<Utc>>,
    /// Version string of the accepted Terms.
    pub terms_version: Option<String>,
    /// When the Privacy Policy was accepted.
    pub privacy_accepted_at: Option<DateTime<Utc>>,
    /// Version string of the accepted Privacy Policy.
    pub privacy_version: Option<String>,
    /// Current marketing consent.
    pub marketing_consent: bool,
    /// When marketing consent was last changed.
    pub marketing_consent_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user is suspended.
    pub fn is_suspended(&self) -> bool {
        self.status == UserStatus::Suspended
    }
}

/// Data required to create a new user at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Marketplace role.
    pub role: UserRole,
    /// Version of Terms accepted at registration.
    pub terms_version: Option<String>,
    /// Version of the Privacy Policy accepted at registration.
    pub privacy_version: Option<String>,
    /// Marketing consent given at registration.
    pub marketing_consent: bool,
}
