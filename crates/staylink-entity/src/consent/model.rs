//! Consent entities — append-only audit records and cookie preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// What a consent audit entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "consent_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConsentType {
    /// Terms of Service acceptance.
    Terms,
    /// Privacy Policy acceptance.
    Privacy,
    /// Marketing communications consent.
    Marketing,
    /// Cookie preferences.
    Cookies,
    /// An account deletion request was filed.
    DeletionRequest,
    /// A pending deletion request was cancelled.
    DeletionCancelled,
}

impl fmt::Display for ConsentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Terms => "terms",
            Self::Privacy => "privacy",
            Self::Marketing => "marketing",
            Self::Cookies => "cookies",
            Self::DeletionRequest => "deletion_request",
            Self::DeletionCancelled => "deletion_cancelled",
        };
        write!(f, "{s}")
    }
}

/// An immutable consent audit entry. Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsentRecord {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The user the entry belongs to. None for anonymous cookie consent.
    pub user_id: Option<Uuid>,
    /// What the entry is about.
    pub consent_type: ConsentType,
    /// Whether consent was given (true) or withdrawn (false).
    pub consent_given: bool,
    /// Version of the document consented to, if applicable.
    pub version: Option<String>,
    /// IP address the change came from.
    pub ip_address: Option<String>,
    /// User-Agent the change came from.
    pub user_agent: Option<String>,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data for appending a consent audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConsentRecord {
    /// The user the entry belongs to, if authenticated.
    pub user_id: Option<Uuid>,
    /// What the entry is about.
    pub consent_type: ConsentType,
    /// Whether consent was given or withdrawn.
    pub consent_given: bool,
    /// Document version, if applicable.
    pub version: Option<String>,
    /// Originating IP address.
    pub ip_address: Option<String>,
    /// Originating User-Agent.
    pub user_agent: Option<String>,
}

/// Cookie consent preferences, one row per visitor.
///
/// Upserted by `visitor_id`; linked to a user once one authenticates.
/// `necessary` is always true.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CookieConsent {
    /// Unique row identifier.
    pub id: Uuid,
    /// Anonymous device/browser identifier.
    pub visitor_id: String,
    /// Linked user, once known.
    pub user_id: Option<Uuid>,
    /// Strictly necessary cookies (always true).
    pub necessary: bool,
    /// Functional cookies.
    pub functional: bool,
    /// Analytics cookies.
    pub analytics: bool,
    /// Marketing cookies.
    pub marketing: bool,
    /// When the row was first created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}
