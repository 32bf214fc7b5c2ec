//! Collaboration entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use super::status::CollaborationStatus;
use super::terms::CollaborationType;

/// Which side opened the proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "initiator_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InitiatorType {
    /// Creator applied to a hotel listing.
    Creator,
    /// Hotel invited a creator.
    Hotel,
}

impl fmt::Display for InitiatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creator => write!(f, "creator"),
            Self::Hotel => write!(f, "hotel"),
        }
    }
}

/// A collaboration proposal linking one creator, one hotel, one listing.
///
/// `hotel_agreed_at` / `creator_agreed_at` stamp agreement with the current
/// `terms_version`; a term proposal bumps the version and clears the other
/// side's stamp. When both stamps are present the proposal is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Collaboration {
    /// Unique collaboration identifier.
    pub id: Uuid,
    /// Which side opened the proposal.
    pub initiator_type: InitiatorType,
    /// Negotiation status.
    pub status: CollaborationStatus,
    /// The creator profile involved.
    pub creator_id: Uuid,
    /// The hotel profile involved.
    pub hotel_id: Uuid,
    /// The listing the proposal is about.
    pub listing_id: Uuid,
    /// Creator's pitch (creator-initiated proposals).
    pub why_great_fit: Option<String>,
    /// Compensation model.
    pub collaboration_type: Option<CollaborationType>,
    /// Minimum nights for a free stay.
    pub free_stay_min_nights: Option<i32>,
    /// Maximum nights for a free stay.
    pub free_stay_max_nights: Option<i32>,
    /// Payment amount for a paid collaboration.
    pub paid_amount: Option<Decimal>,
    /// Discount percentage for a discount collaboration.
    pub discount_percentage: Option<i32>,
    /// Proposed check-in date.
    pub travel_date_from: Option<NaiveDate>,
    /// Proposed check-out date.
    pub travel_date_to: Option<NaiveDate>,
    /// Preferred months (abbreviations like "Jan").
    pub preferred_months: Option<Vec<String>>,
    /// Platform deliverables commitment (JSONB).
    pub platform_deliverables: serde_json::Value,
    /// Monotonic version of the term set; bumped by every proposal.
    pub terms_version: i32,
    /// When the hotel agreed to the current term version.
    pub hotel_agreed_at: Option<DateTime<Utc>>,
    /// When the creator agreed to the current term version.
    pub creator_agreed_at: Option<DateTime<Utc>>,
    /// When the proposal was created.
    pub created_at: DateTime<Utc>,
    /// When the proposal was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the receiving side responded.
    pub responded_at: Option<DateTime<Utc>>,
    /// When the collaboration was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// When the collaboration was completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Collaboration {
    /// Whether both sides have agreed to the current term set.
    pub fn both_agreed(&self) -> bool {
        self.hotel_agreed_at.is_some() && self.creator_agreed_at.is_some()
    }
}

/// Data required to create a new collaboration proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCollaboration {
    /// Which side is opening the proposal.
    pub initiator_type: InitiatorType,
    /// The creator profile involved.
    pub creator_id: Uuid,
    /// The hotel profile involved.
    pub hotel_id: Uuid,
    /// The listing the proposal is about.
    pub listing_id: Uuid,
    /// Creator's pitch.
    pub why_great_fit: Option<String>,
    /// Compensation model.
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
    pub platform_deliverables: serde_json::Value,
}
