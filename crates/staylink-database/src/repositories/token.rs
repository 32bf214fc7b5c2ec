//! Single-use token ledger (auth store).
//!
//! Three tables, one invariant: at most one live (unused, unexpired) token
//! per owner per kind. Issuance runs invalidate-then-insert in one
//! transaction that first locks the owning user row, so two concurrent
//! resends serialize instead of leaving two live tokens behind. Codes are
//! keyed by bare email (no user row to lock); their reissue race is
//! accepted and bounded by the 15-minute TTL. Rows are never deleted;
//! consumption flips `used` under a `used = false` guard so a token can be
//! consumed at most once.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use staylink_core::error::{AppError, ErrorKind};
use staylink_core::result::AppResult;
use staylink_entity::token::{VerificationCodeRow, VerifiedTokenRow};

/// Repository for the three single-use token tables.
#[derive(Debug, Clone)]
pub struct TokenLedger {
    pool: PgPool,
}

impl TokenLedger {
    /// Create a new token ledger on the auth store pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ── password reset tokens ────────────────────────────────────

    /// Persist a new password reset token, invalidating any live ones for
    /// the same user.
    pub async fn issue_password_reset(
        &self,
        user_id: Uuid,
        token: &str,
        ttl_hours: i64,
    ) -> AppResult<()> {
        let expires_at = Utc::now() + Duration::hours(ttl_hours);
        let mut tx = self.pool.begin().await.map_err(map_db)?;

        lock_owner(&mut tx, user_id).await?;

        sqlx::query(
            "UPDATE password_reset_tokens SET used = TRUE \
             WHERE user_id = $1 AND used = FALSE AND expires_at > NOW()",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db)?;

        sqlx::query(
            "INSERT INTO password_reset_tokens (user_id, token, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db)?;

        tx.commit().await.map_err(map_db)?;
        Ok(())
    }

    /// Fetch a password reset token if it is live and its owner is not
    /// suspended. Absence, expiry, prior use, and suspension all collapse
    /// to `None`.
    pub async fn find_valid_password_reset(
        &self,
        token: &str,
    ) -> AppResult<Option<VerifiedTokenRow>> {
        sqlx::query_as::<_, VerifiedTokenRow>(
            "SELECT prt.id, prt.user_id, prt.expires_at, u.email, u.status \
             FROM password_reset_tokens prt \
             JOIN users u ON u.id = prt.user_id \
             WHERE prt.token = $1 AND prt.used = FALSE AND prt.expires_at > NOW() \
               AND u.status <> 'suspended'",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Consume a password reset token. Returns whether the flip happened;
    /// a second call for the same token returns false.
    pub async fn consume_password_reset(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE password_reset_tokens SET used = TRUE WHERE token = $1 AND used = FALSE",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db)?;

        Ok(result.rows_affected() > 0)
    }

    // ── email verification tokens ────────────────────────────────

    /// Persist a new email verification token, invalidating any live ones
    /// for the same user.
    pub async fn issue_email_verification(
        &self,
        user_id: Uuid,
        token: &str,
        ttl_hours: i64,
    ) -> AppResult<()> {
        let expires_at = Utc::now() + Duration::hours(ttl_hours);
        let mut tx = self.pool.begin().await.map_err(map_db)?;

        lock_owner(&mut tx, user_id).await?;

        sqlx::query(
            "UPDATE email_verification_tokens SET used = TRUE \
             WHERE user_id = $1 AND used = FALSE AND expires_at > NOW()",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db)?;

        sqlx::query(
            "INSERT INTO email_verification_tokens (user_id, token, expires_at) \
             VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db)?;

        tx.commit().await.map_err(map_db)?;
        Ok(())
    }

    /// Fetch an email verification token if it is live and its owner is not
    /// suspended.
    pub async fn find_valid_email_verification(
        &self,
        token: &str,
    ) -> AppResult<Option<VerifiedTokenRow>> {
        sqlx::query_as::<_, VerifiedTokenRow>(
            "SELECT evt.id, evt.user_id, evt.expires_at, u.email, u.status \
             FROM email_verification_tokens evt \
             JOIN users u ON u.id = evt.user_id \
             WHERE evt.token = $1 AND evt.used = FALSE AND evt.expires_at > NOW() \
               AND u.status <> 'suspended'",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Consume an email verification token.
    pub async fn consume_email_verification(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE email_verification_tokens SET used = TRUE WHERE token = $1 AND used = FALSE",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db)?;

        Ok(result.rows_affected() > 0)
    }

    // ── email verification codes ─────────────────────────────────

    /// Persist a new verification code for an email, invalidating any live
    /// codes for the same address. Codes are owned by a bare email so that
    /// verification can run before an account exists.
    pub async fn issue_verification_code(
        &self,
        email: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> AppResult<()> {
        let expires_at = Utc::now() + Duration::minutes(ttl_minutes);
        let mut tx = self.pool.begin().await.map_err(map_db)?;

        sqlx::query(
            "UPDATE email_verification_codes SET used = TRUE \
             WHERE email = $1 AND used = FALSE AND expires_at > NOW()",
        )
        .bind(email)
        .execute(&mut *tx)
        .await
        .map_err(map_db)?;

        sqlx::query(
            "INSERT INTO email_verification_codes (email, code, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(email)
        .bind(code)
        .bind(expires_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db)?;

        tx.commit().await.map_err(map_db)?;
        Ok(())
    }

    /// Fetch a live verification code. Codes are short and could collide
    /// across users, so the lookup requires both email and code to match.
    pub async fn find_valid_verification_code(
        &self,
        email: &str,
        code: &str,
    ) -> AppResult<Option<VerificationCodeRow>> {
        sqlx::query_as::<_, VerificationCodeRow>(
            "SELECT id, email, expires_at, created_at \
             FROM email_verification_codes \
             WHERE email = $1 AND code = $2 AND used = FALSE AND expires_at > NOW() \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Consume a verification code by row ID.
    pub async fn consume_verification_code(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE email_verification_codes SET used = TRUE WHERE id = $1 AND used = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Lock the owning user row so concurrent issuance for the same owner
/// serializes within the invalidate-then-insert transaction.
async fn lock_owner(
    tx: &mut sqlx::Transaction<'static, sqlx::Postgres>,
    user_id: Uuid,
) -> AppResult<()> {
    sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_id)
        .execute(&mut **tx)
        .await
        .map_err(map_db)?;
    Ok(())
}

fn map_db(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Token ledger query failed", e)
}
