//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use staylink_entity::gdpr::{GdprRequest, GdprRequestStatus, GdprRequestType};
use staylink_entity::user::User;

/// Simple message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Marketplace role.
    #[serde(rename = "type")]
    pub role: String,
    /// Account lifecycle status.
    pub status: String,
    /// Whether the email is confirmed.
    pub email_verified: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.to_string(),
            status: user.status.to_string(),
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

/// Login/registration response with the issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Marketplace role.
    #[serde(rename = "type")]
    pub role: String,
    /// Account lifecycle status.
    pub status: String,
    /// The issued session token.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
    /// Token validity in seconds.
    pub expires_in: i64,
    /// Human-readable message.
    pub message: String,
}

/// Forgot-password response. The token is only present in debug
/// deployments; production relies on the email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    /// Human-readable message (identical whether or not the email exists).
    pub message: String,
    /// The reset token, debug deployments only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Email verification outcome (link token flow).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    /// Human-readable message.
    pub message: String,
    /// Whether the email was verified.
    pub verified: bool,
    /// The verified email, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Send-verification-code outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendVerificationCodeResponse {
    /// Human-readable message.
    pub message: String,
    /// The code, debug deployments only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Verify-email-code outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailCodeResponse {
    /// Human-readable message.
    pub message: String,
    /// Whether the code was accepted.
    pub verified: bool,
}

/// Marketing consent update outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingConsentResponse {
    /// New marketing consent value.
    pub marketing_consent: bool,
    /// When it was changed.
    pub marketing_consent_at: Option<DateTime<Utc>>,
    /// Human-readable message.
    pub message: String,
}

/// GDPR request view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdprRequestResponse {
    /// Request ID.
    pub id: Uuid,
    /// Export or deletion.
    pub request_type: GdprRequestType,
    /// Current status.
    pub status: GdprRequestStatus,
    /// When the request was filed.
    pub requested_at: DateTime<Utc>,
    /// When processing finished.
    pub processed_at: Option<DateTime<Utc>>,
    /// Validity window end / scheduled deletion date.
    pub expires_at: Option<DateTime<Utc>>,
    /// Human-readable message, where the endpoint carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GdprRequestResponse {
    /// Build a response view, optionally with a message.
    pub fn from_request(request: &GdprRequest, message: Option<String>) -> Self {
        Self {
            id: request.id,
            request_type: request.request_type,
            status: request.status,
            requested_at: request.requested_at,
            processed_at: request.processed_at,
            expires_at: request.expires_at,
            message,
        }
    }
}

/// Deletion cancellation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionCancelResponse {
    /// Human-readable message.
    pub message: String,
    /// Whether a pending request was cancelled.
    pub cancelled: bool,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status string.
    pub status: String,
    /// Whether both stores answered, detailed checks only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<bool>,
}
