//! Consent audit and cookie consent repository (auth store).

use sqlx::PgPool;
use uuid::Uuid;

use staylink_core::error::{AppError, ErrorKind};
use staylink_core::result::AppResult;
use staylink_core::types::pagination::{PageRequest, PageResponse};
use staylink_entity::consent::{ConsentRecord, CookieConsent, NewConsentRecord};

/// Repository for the append-only consent history and cookie preferences.
#[derive(Debug, Clone)]
pub struct ConsentRepository {
    pool: PgPool,
}

impl ConsentRepository {
    /// Create a new consent repository on the auth store pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a consent audit entry. The history table is never updated or
    /// deleted from.
    pub async fn append(&self, record: &NewConsentRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO consent_history \
                 (user_id, consent_type, consent_given, version, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.user_id)
        .bind(record.consent_type)
        .bind(record.consent_given)
        .bind(&record.version)
        .bind(&record.ip_address)
        .bind(&record.user_agent)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append consent record", e)
        })?;
        Ok(())
    }

    /// List a user's consent history, newest first.
    pub async fn history(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ConsentRecord>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM consent_history WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count consent history", e)
                })?;

        let records = sqlx::query_as::<_, ConsentRecord>(
            "SELECT * FROM consent_history WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list consent history", e)
        })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert or update cookie consent for a visitor.
    ///
    /// Keyed by `visitor_id`; an authenticated user is linked on first
    /// opportunity and never unlinked. `necessary` is forced true.
    pub async fn upsert_cookie_consent(
        &self,
        visitor_id: &str,
        user_id: Option<Uuid>,
        functional: bool,
        analytics: bool,
        marketing: bool,
    ) -> AppResult<CookieConsent> {
        sqlx::query_as::<_, CookieConsent>(
            "INSERT INTO cookie_consent \
                 (visitor_id, user_id, necessary, functional, analytics, marketing) \
             VALUES ($1, $2, TRUE, $3, $4, $5) \
             ON CONFLICT (visitor_id) DO UPDATE \
             SET user_id = COALESCE($2, cookie_consent.user_id), \
                 functional = $3, analytics = $4, marketing = $5, updated_at = NOW() \
             RETURNING *",
        )
        .bind(visitor_id)
        .bind(user_id)
        .bind(functional)
        .bind(analytics)
        .bind(marketing)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert cookie consent", e)
        })
    }

    /// Fetch cookie consent for a visitor.
    pub async fn find_cookie_consent(&self, visitor_id: &str) -> AppResult<Option<CookieConsent>> {
        sqlx::query_as::<_, CookieConsent>("SELECT * FROM cookie_consent WHERE visitor_id = $1")
            .bind(visitor_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find cookie consent", e)
            })
    }
}
