//! Request DTOs with validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use staylink_entity::collaboration::{
    CollaborationStatus, CollaborationType, InitiatorType, PlatformDeliverables,
};
use staylink_entity::user::{UserRole, UserStatus};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Password (minimum 8 characters).
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Requested role: creator or hotel.
    #[serde(rename = "type")]
    pub role: UserRole,
    /// Display name (optional, defaults to the email prefix).
    pub name: Option<String>,
    /// Terms of Service acceptance. Must be true.
    pub terms_accepted: bool,
    /// Privacy Policy acceptance. Must be true.
    pub privacy_accepted: bool,
    /// Optional marketing consent.
    #[serde(default)]
    pub marketing_consent: bool,
    /// Version of the accepted Terms.
    pub terms_version: Option<String>,
    /// Version of the accepted Privacy Policy.
    pub privacy_version: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token introspection request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenRequest {
    /// The token to introspect.
    pub token: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// The single-use reset token from the emailed link.
    pub token: String,
    /// New password (minimum 8 characters).
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Verification-link query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailQuery {
    /// The single-use verification token.
    pub token: String,
}

/// Send-verification-code request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendVerificationCodeRequest {
    /// Email address to send the code to.
    #[validate(email)]
    pub email: String,
}

/// Verify-email-code request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailCodeRequest {
    /// Email address the code was sent to.
    #[validate(email)]
    pub email: String,
    /// The 6-digit verification code.
    #[validate(length(equal = 6, message = "Code must be exactly 6 digits"))]
    pub code: String,
}

/// Marketing-consent update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMarketingConsentRequest {
    /// New marketing consent value.
    pub marketing_consent: bool,
}

/// Cookie-consent upsert body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CookieConsentRequest {
    /// Anonymous device/browser identifier.
    #[validate(length(min = 1, max = 128))]
    pub visitor_id: String,
    /// Functional cookies allowed.
    #[serde(default)]
    pub functional: bool,
    /// Analytics cookies allowed.
    #[serde(default)]
    pub analytics: bool,
    /// Marketing cookies allowed.
    #[serde(default)]
    pub marketing: bool,
}

/// Cookie-consent lookup query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConsentQuery {
    /// Anonymous device/browser identifier.
    pub visitor_id: String,
}

/// Export download query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDownloadQuery {
    /// Secret download token from the export request.
    pub token: String,
}

/// Collaboration creation body. `initiator_type` decides which of the
/// optional field groups is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollaborationRequest {
    /// Who is opening the proposal.
    pub initiator_type: InitiatorType,
    /// The listing the proposal is about.
    pub listing_id: Uuid,
    /// The invited creator (required for hotel invitations).
    pub creator_id: Option<Uuid>,
    /// Creator's pitch (required for creator applications).
    pub why_great_fit: Option<String>,
    /// Consent flag (must be true for creator applications).
    pub consent: Option<bool>,
    /// Compensation model (required for hotel invitations).
    pub collaboration_type: Option<CollaborationType>,
    /// Minimum nights for a free stay.
    pub free_stay_min_nights: Option<i32>,
    /// Maximum nights for a free stay.
    pub free_stay_max_nights: Option<i32>,
    /// Payment amount.
    pub paid_amount: Option<Decimal>,
    /// Discount percentage.
    pub discount_percentage: Option<i32>,
    /// Proposed check-in date.
    pub travel_date_from: Option<NaiveDate>,
    /// Proposed check-out date.
    pub travel_date_to: Option<NaiveDate>,
    /// Preferred months.
    pub preferred_months: Option<Vec<String>>,
    /// Platform deliverables commitment.
    pub platform_deliverables: Vec<PlatformDeliverables>,
}

/// Collaboration response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondToCollaborationRequest {
    /// Response: accepted or declined.
    pub status: CollaborationResponseStatus,
    /// Optional message appended to the chat thread.
    pub response_message: Option<String>,
}

/// The two legal direct responses to a pending proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationResponseStatus {
    /// Accept the proposal as offered.
    Accepted,
    /// Decline the proposal.
    Declined,
}

/// Chat message body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostMessageRequest {
    /// Message content.
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Collaboration list query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationListQuery {
    /// Optional status filter.
    pub status: Option<CollaborationStatus>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Page size.
    pub page_size: Option<u64>,
}

/// Generic pagination query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Page size.
    pub page_size: Option<u64>,
}

/// Admin body for changing a user's lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeUserStatusRequest {
    /// The new status.
    pub status: UserStatus,
}
