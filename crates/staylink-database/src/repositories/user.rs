//! User repository (auth store).

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use staylink_core::error::{AppError, ErrorKind};
use staylink_core::result::AppResult;
use staylink_entity::user::model::CreateUser;
use staylink_entity::user::{User, UserStatus};

/// Repository for user identity rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository on the auth store pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Create a new user with registration-time consent stamps.
    ///
    /// New accounts always start as `pending`; the terms and privacy
    /// acceptance timestamps are stamped server-side at insert time.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name, role, status, \
                                terms_accepted_at, terms_version, \
                                privacy_accepted_at, privacy_version, \
                                marketing_consent, marketing_consent_at) \
             VALUES ($1, $2, $3, $4, 'pending', NOW(), $5, NOW(), $6, $7, \
                     CASE WHEN $7 THEN NOW() ELSE NULL END) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.name)
        .bind(data.role)
        .bind(&data.terms_version)
        .bind(&data.privacy_version)
        .bind(data.marketing_consent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already registered")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Mark a user's email as verified.
    pub async fn set_email_verified(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET email_verified = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark email verified", e)
            })?;
        Ok(())
    }

    /// Update a user's lifecycle status.
    pub async fn update_status(&self, user_id: Uuid, status: UserStatus) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Update marketing consent and its timestamp.
    pub async fn update_marketing_consent(
        &self,
        user_id: Uuid,
        consent: bool,
    ) -> AppResult<(bool, Option<DateTime<Utc>>)> {
        let row: Option<(bool, Option<DateTime<Utc>>)> = sqlx::query_as(
            "UPDATE users SET marketing_consent = $2, marketing_consent_at = NOW(), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING marketing_consent, marketing_consent_at",
        )
        .bind(user_id)
        .bind(consent)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update marketing consent", e)
        })?;

        row.ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Delete a user by ID.
    ///
    /// Used by the registration compensating action and GDPR erasure;
    /// dependent auth-store rows cascade.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
