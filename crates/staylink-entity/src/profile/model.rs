//! Creator and hotel profile models.
//!
//! Profiles live in the business store and are created right after the user
//! row lands in the auth store. Role-scoped endpoints require the matching
//! profile row to exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A content creator's profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CreatorProfile {
    /// Unique profile identifier.
    pub id: Uuid,
    /// Owning user (auth store).
    pub user_id: Uuid,
    /// Public display name.
    pub display_name: String,
    /// Profile picture URL, if uploaded.
    pub profile_picture: Option<String>,
    /// Short bio.
    pub bio: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A read-only view of a hotel listing, enough to anchor a collaboration.
///
/// Listing management itself lives outside this core; collaborations only
/// need to resolve a listing to its owning hotel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListingSummary {
    /// Listing identifier.
    pub id: Uuid,
    /// Owning hotel profile.
    pub hotel_profile_id: Uuid,
    /// Listing name.
    pub name: String,
    /// Listing location.
    pub location: Option<String>,
}

/// A hotel's profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelProfile {
    /// Unique profile identifier.
    pub id: Uuid,
    /// Owning user (auth store).
    pub user_id: Uuid,
    /// Hotel name.
    pub name: String,
    /// Location string shown on listings.
    pub location: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}
