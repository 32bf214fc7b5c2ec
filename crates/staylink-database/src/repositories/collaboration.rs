//! Collaboration repository (business store).
//!
//! Status transitions run inside a caller-provided transaction so that the
//! transition and its system chat message commit or roll back together.

use sqlx::postgres::PgConnection;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use staylink_core::error::{AppError, ErrorKind};
use staylink_core::result::AppResult;
use staylink_core::types::pagination::{PageRequest, PageResponse};
use staylink_entity::collaboration::model::NewCollaboration;
use staylink_entity::collaboration::{Collaboration, CollaborationStatus, InitiatorType, TermsPatch};

use crate::patch::PatchBuilder;

/// Repository for collaboration proposals.
#[derive(Debug, Clone)]
pub struct CollaborationRepository {
    pool: PgPool,
}

impl CollaborationRepository {
    /// Create a new collaboration repository on the business store pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction for a transition + chat message pair.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(map_db)
    }

    /// Create a new proposal in the `pending` state.
    pub async fn create(&self, data: &NewCollaboration) -> AppResult<Collaboration> {
        sqlx::query_as::<_, Collaboration>(
            "INSERT INTO collaborations ( \
                 initiator_type, status, creator_id, hotel_id, listing_id, \
                 why_great_fit, collaboration_type, \
                 free_stay_min_nights, free_stay_max_nights, \
                 paid_amount, discount_percentage, \
                 travel_date_from, travel_date_to, \
                 preferred_months, platform_deliverables) \
             VALUES ($1, 'pending', $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING *",
        )
        .bind(data.initiator_type)
        .bind(data.creator_id)
        .bind(data.hotel_id)
        .bind(data.listing_id)
        .bind(&data.why_great_fit)
        .bind(data.collaboration_type)
        .bind(data.free_stay_min_nights)
        .bind(data.free_stay_max_nights)
        .bind(data.paid_amount)
        .bind(data.discount_percentage)
        .bind(data.travel_date_from)
        .bind(data.travel_date_to)
        .bind(&data.preferred_months)
        .bind(&data.platform_deliverables)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db)
    }

    /// Find a proposal by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Collaboration>> {
        sqlx::query_as::<_, Collaboration>("SELECT * FROM collaborations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db)
    }

    /// Check for an active proposal between a creator and a listing.
    pub async fn find_active_between(
        &self,
        creator_id: Uuid,
        listing_id: Uuid,
    ) -> AppResult<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM collaborations \
             WHERE creator_id = $1 AND listing_id = $2 \
               AND status IN ('pending', 'negotiating', 'accepted')",
        )
        .bind(creator_id)
        .bind(listing_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db)
    }

    /// List proposals for a creator, newest first, optionally status-filtered.
    pub async fn list_for_creator(
        &self,
        creator_id: Uuid,
        status: Option<CollaborationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Collaboration>> {
        self.list_for_side("creator_id", creator_id, status, page)
            .await
    }

    /// List proposals for a hotel, newest first, optionally status-filtered.
    pub async fn list_for_hotel(
        &self,
        hotel_id: Uuid,
        status: Option<CollaborationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Collaboration>> {
        self.list_for_side("hotel_id", hotel_id, status, page).await
    }

    async fn list_for_side(
        &self,
        column: &str,
        owner_id: Uuid,
        status: Option<CollaborationStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Collaboration>> {
        // `column` is a code constant, never request input.
        let (count_sql, list_sql) = if status.is_some() {
            (
                format!("SELECT COUNT(*) FROM collaborations WHERE {column} = $1 AND status = $2"),
                format!(
                    "SELECT * FROM collaborations WHERE {column} = $1 AND status = $2 \
                     ORDER BY created_at DESC LIMIT $3 OFFSET $4"
                ),
            )
        } else {
            (
                format!("SELECT COUNT(*) FROM collaborations WHERE {column} = $1"),
                format!(
                    "SELECT * FROM collaborations WHERE {column} = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ),
            )
        };

        let total: i64 = if let Some(status) = status {
            sqlx::query_scalar(&count_sql)
                .bind(owner_id)
                .bind(status)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db)?
        } else {
            sqlx::query_scalar(&count_sql)
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db)?
        };

        let rows = if let Some(status) = status {
            sqlx::query_as::<_, Collaboration>(&list_sql)
                .bind(owner_id)
                .bind(status)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db)?
        } else {
            sqlx::query_as::<_, Collaboration>(&list_sql)
                .bind(owner_id)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(map_db)?
        };

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    // ── transitions (transaction-scoped) ─────────────────────────

    /// Record the receiving side's direct response to a pending proposal.
    ///
    /// Accepting without negotiation stamps both agreement timestamps.
    pub async fn mark_responded(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        status: CollaborationStatus,
    ) -> AppResult<Collaboration> {
        let sql = match status {
            CollaborationStatus::Accepted => {
                "UPDATE collaborations \
                 SET status = 'accepted', responded_at = NOW(), \
                     hotel_agreed_at = NOW(), creator_agreed_at = NOW(), updated_at = NOW() \
                 WHERE id = $1 RETURNING *"
            }
            CollaborationStatus::Declined => {
                "UPDATE collaborations \
                 SET status = 'declined', responded_at = NOW(), updated_at = NOW() \
                 WHERE id = $1 RETURNING *"
            }
            _ => {
                return Err(AppError::validation(
                    "Response status must be accepted or declined",
                ));
            }
        };

        sqlx::query_as::<_, Collaboration>(sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db)
    }

    /// Apply a term proposal: move to `negotiating`, bump the term version,
    /// reset both agreement stamps, then set the proposer's own.
    pub async fn apply_terms_patch(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        patch: &TermsPatch,
        proposer: InitiatorType,
    ) -> AppResult<Collaboration> {
        let mut builder = PatchBuilder::new("collaborations");
        builder.set_raw("status = 'negotiating'");
        builder.set_raw("terms_version = terms_version + 1");
        builder.set_raw("updated_at = NOW()");
        match proposer {
            InitiatorType::Hotel => {
                builder.set_raw("hotel_agreed_at = NOW()");
                builder.set_raw("creator_agreed_at = NULL");
            }
            InitiatorType::Creator => {
                builder.set_raw("creator_agreed_at = NOW()");
                builder.set_raw("hotel_agreed_at = NULL");
            }
        }

        if let Some(v) = patch.collaboration_type {
            builder.set("collaboration_type", v);
        }
        if let Some(v) = patch.free_stay_min_nights {
            builder.set("free_stay_min_nights", v);
        }
        if let Some(v) = patch.free_stay_max_nights {
            builder.set("free_stay_max_nights", v);
        }
        if let Some(v) = patch.paid_amount {
            builder.set("paid_amount", v);
        }
        if let Some(v) = patch.discount_percentage {
            builder.set("discount_percentage", v);
        }
        if let Some(v) = patch.travel_date_from {
            builder.set("travel_date_from", v);
        }
        if let Some(v) = patch.travel_date_to {
            builder.set("travel_date_to", v);
        }
        if let Some(ref v) = patch.preferred_months {
            builder.set("preferred_months", v.clone());
        }
        if let Some(ref v) = patch.platform_deliverables {
            let json = serde_json::to_value(v)
                .map_err(|e| AppError::internal(format!("Failed to encode deliverables: {e}")))?;
            builder.set("platform_deliverables", json);
        }

        let mut query = builder.finish_where_id(id, Some("*"));
        query
            .build_query_as::<Collaboration>()
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db)
    }

    /// Stamp one side's agreement with the current term set.
    pub async fn record_agreement(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        side: InitiatorType,
    ) -> AppResult<Collaboration> {
        let sql = match side {
            InitiatorType::Hotel => {
                "UPDATE collaborations \
                 SET hotel_agreed_at = NOW(), updated_at = NOW() \
                 WHERE id = $1 RETURNING *"
            }
            InitiatorType::Creator => {
                "UPDATE collaborations \
                 SET creator_agreed_at = NOW(), updated_at = NOW() \
                 WHERE id = $1 RETURNING *"
            }
        };

        sqlx::query_as::<_, Collaboration>(sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_db)
    }

    /// Move an agreed proposal to `accepted`.
    pub async fn mark_accepted(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Collaboration> {
        sqlx::query_as::<_, Collaboration>(
            "UPDATE collaborations \
             SET status = 'accepted', responded_at = COALESCE(responded_at, NOW()), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db)
    }

    /// Move an accepted collaboration to `cancelled`.
    pub async fn mark_cancelled(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Collaboration> {
        sqlx::query_as::<_, Collaboration>(
            "UPDATE collaborations \
             SET status = 'cancelled', cancelled_at = NOW(), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db)
    }

    /// Move an accepted collaboration to `completed`.
    pub async fn mark_completed(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Collaboration> {
        sqlx::query_as::<_, Collaboration>(
            "UPDATE collaborations \
             SET status = 'completed', completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db)
    }
}

fn map_db(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Collaboration query failed", e)
}
