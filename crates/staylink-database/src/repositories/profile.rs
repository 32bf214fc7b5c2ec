//! Creator and hotel profile repository (business store).

use sqlx::PgPool;
use uuid::Uuid;

use staylink_core::error::{AppError, ErrorKind};
use staylink_core::result::AppResult;
use staylink_entity::profile::{CreatorProfile, HotelProfile, ListingSummary};

/// Repository for role profile rows.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository on the business store pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a creator profile for a freshly registered user.
    pub async fn create_creator(
        &self,
        user_id: Uuid,
        display_name: &str,
    ) -> AppResult<CreatorProfile> {
        sqlx::query_as::<_, CreatorProfile>(
            "INSERT INTO creators (user_id, display_name) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create creator profile", e)
        })
    }

    /// Create a hotel profile for a freshly registered user.
    pub async fn create_hotel(&self, user_id: Uuid, name: &str) -> AppResult<HotelProfile> {
        sqlx::query_as::<_, HotelProfile>(
            "INSERT INTO hotel_profiles (user_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create hotel profile", e)
        })
    }

    /// Find a creator profile by its owning user.
    pub async fn find_creator_by_user(&self, user_id: Uuid) -> AppResult<Option<CreatorProfile>> {
        sqlx::query_as::<_, CreatorProfile>("SELECT * FROM creators WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find creator profile", e)
            })
    }

    /// Find a creator profile by its own ID.
    pub async fn find_creator_by_id(&self, id: Uuid) -> AppResult<Option<CreatorProfile>> {
        sqlx::query_as::<_, CreatorProfile>("SELECT * FROM creators WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find creator profile", e)
            })
    }

    /// Resolve a listing to its owning hotel.
    pub async fn find_listing(&self, id: Uuid) -> AppResult<Option<ListingSummary>> {
        sqlx::query_as::<_, ListingSummary>(
            "SELECT id, hotel_profile_id, name, location FROM hotel_listings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find listing", e))
    }

    /// Find a hotel profile by its owning user.
    pub async fn find_hotel_by_user(&self, user_id: Uuid) -> AppResult<Option<HotelProfile>> {
        sqlx::query_as::<_, HotelProfile>("SELECT * FROM hotel_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find hotel profile", e)
            })
    }
}
