//! GDPR request repository (auth store).

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use staylink_core::error::{AppError, ErrorKind};
use staylink_core::result::AppResult;
use staylink_entity::gdpr::{GdprRequest, GdprRequestStatus, GdprRequestType};

/// Repository for GDPR export and deletion requests.
#[derive(Debug, Clone)]
pub struct GdprRepository {
    pool: PgPool,
}

impl GdprRepository {
    /// Create a new GDPR repository on the auth store pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an active (pending/processing) request of the given type.
    pub async fn find_active(
        &self,
        user_id: Uuid,
        request_type: GdprRequestType,
    ) -> AppResult<Option<GdprRequest>> {
        sqlx::query_as::<_, GdprRequest>(
            "SELECT * FROM gdpr_requests \
             WHERE user_id = $1 AND request_type = $2 AND status IN ('pending', 'processing')",
        )
        .bind(user_id)
        .bind(request_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Create an export request with its secret download token.
    pub async fn create_export(
        &self,
        user_id: Uuid,
        download_token: &str,
        expires_at: DateTime<Utc>,
        ip_address: Option<&str>,
    ) -> AppResult<GdprRequest> {
        sqlx::query_as::<_, GdprRequest>(
            "INSERT INTO gdpr_requests \
                 (user_id, request_type, status, download_token, expires_at, ip_address) \
             VALUES ($1, 'export', 'pending', $2, $3, $4) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(download_token)
        .bind(expires_at)
        .bind(ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Create a deletion request; `expires_at` is the scheduled deletion date.
    pub async fn create_deletion(
        &self,
        user_id: Uuid,
        scheduled_deletion: DateTime<Utc>,
        ip_address: Option<&str>,
    ) -> AppResult<GdprRequest> {
        sqlx::query_as::<_, GdprRequest>(
            "INSERT INTO gdpr_requests (user_id, request_type, status, expires_at, ip_address) \
             VALUES ($1, 'deletion', 'pending', $2, $3) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(scheduled_deletion)
        .bind(ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Update a request's status.
    pub async fn update_status(&self, id: Uuid, status: GdprRequestStatus) -> AppResult<()> {
        sqlx::query("UPDATE gdpr_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(map_db)?;
        Ok(())
    }

    /// Mark a request completed with a processing timestamp.
    pub async fn mark_completed(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE gdpr_requests SET status = 'completed', processed_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db)?;
        Ok(())
    }

    /// Find an export request by its download token.
    pub async fn find_by_download_token(&self, token: &str) -> AppResult<Option<GdprRequest>> {
        sqlx::query_as::<_, GdprRequest>(
            "SELECT * FROM gdpr_requests \
             WHERE download_token = $1 AND request_type = 'export'",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Find the most recent request of the given type for a user.
    pub async fn find_latest(
        &self,
        user_id: Uuid,
        request_type: GdprRequestType,
    ) -> AppResult<Option<GdprRequest>> {
        sqlx::query_as::<_, GdprRequest>(
            "SELECT * FROM gdpr_requests \
             WHERE user_id = $1 AND request_type = $2 \
             ORDER BY requested_at DESC LIMIT 1",
        )
        .bind(user_id)
        .bind(request_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Find a user's pending deletion request, if any.
    pub async fn find_pending_deletion(&self, user_id: Uuid) -> AppResult<Option<GdprRequest>> {
        sqlx::query_as::<_, GdprRequest>(
            "SELECT * FROM gdpr_requests \
             WHERE user_id = $1 AND request_type = 'deletion' AND status = 'pending'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Cancel a request with a fixed reason.
    pub async fn cancel(&self, id: Uuid, reason: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE gdpr_requests SET status = 'cancelled', cancellation_reason = $2 WHERE id = $1",
        )
        .bind(id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(map_db)?;
        Ok(())
    }
}

fn map_db(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "GDPR request query failed", e)
}
