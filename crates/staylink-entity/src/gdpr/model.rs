//! GDPR request model and status machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// The two data-subject-rights request types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gdpr_request_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GdprRequestType {
    /// Data export (Article 20 — right to data portability).
    Export,
    /// Account deletion (Article 17 — right to erasure).
    Deletion,
}

impl fmt::Display for GdprRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Export => write!(f, "export"),
            Self::Deletion => write!(f, "deletion"),
        }
    }
}

/// Status of a GDPR request.
///
/// `pending -> processing -> completed`, or `pending -> cancelled`.
/// `Expired` is never written by the lifecycle itself; it is only observed at
/// read time when `expires_at` has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gdpr_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GdprRequestStatus {
    /// Filed, not yet worked on. Retryable.
    Pending,
    /// Collection in progress.
    Processing,
    /// Done; export downloadable until `expires_at`.
    Completed,
    /// Cancelled during the grace window.
    Cancelled,
    /// Past its validity window.
    Expired,
}

impl GdprRequestStatus {
    /// Whether this status counts as active for the one-active-request rule.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl fmt::Display for GdprRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        };
        write!(f, "{s}")
    }
}

/// A GDPR export or deletion request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GdprRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// Requesting user.
    pub user_id: Uuid,
    /// Export or deletion.
    pub request_type: GdprRequestType,
    /// Current status.
    pub status: GdprRequestStatus,
    /// When the request was filed.
    pub requested_at: DateTime<Utc>,
    /// When collection/processing finished.
    pub processed_at: Option<DateTime<Utc>>,
    /// Export: download-link validity end. Deletion: scheduled deletion date.
    pub expires_at: Option<DateTime<Utc>>,
    /// Secret download token (export requests only).
    #[serde(skip_serializing)]
    pub download_token: Option<String>,
    /// Why the request was cancelled, if it was.
    pub cancellation_reason: Option<String>,
    /// IP address the request came from.
    pub ip_address: Option<String>,
}

impl GdprRequest {
    /// Whether the request's validity window has passed.
    pub fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(GdprRequestStatus::Pending.is_active());
        assert!(GdprRequestStatus::Processing.is_active());
        assert!(!GdprRequestStatus::Completed.is_active());
        assert!(!GdprRequestStatus::Cancelled.is_active());
    }
}
