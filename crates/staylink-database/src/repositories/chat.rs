//! Chat message repository (business store).

use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnection;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use staylink_core::error::{AppError, ErrorKind};
use staylink_core::result::AppResult;
use staylink_core::types::pagination::{PageRequest, PageResponse};
use staylink_entity::chat::{ChatMessage, MessageAuthor};

/// Raw persisted shape; authorship is reconstructed into the entity enum.
#[derive(Debug, FromRow)]
struct ChatMessageRow {
    id: Uuid,
    collaboration_id: Uuid,
    sender_id: Option<Uuid>,
    message_type: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        ChatMessage {
            id: row.id,
            collaboration_id: row.collaboration_id,
            author: MessageAuthor::from_columns(&row.message_type, row.sender_id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Repository for collaboration chat threads.
#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Create a new chat repository on the business store pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a system-authored message inside a transition transaction.
    pub async fn insert_system(
        &self,
        conn: &mut PgConnection,
        collaboration_id: Uuid,
        content: &str,
    ) -> AppResult<ChatMessage> {
        let row = sqlx::query_as::<_, ChatMessageRow>(
            "INSERT INTO chat_messages (collaboration_id, sender_id, message_type, content) \
             VALUES ($1, NULL, 'system', $2) \
             RETURNING id, collaboration_id, sender_id, message_type, content, created_at",
        )
        .bind(collaboration_id)
        .bind(content)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db)?;

        Ok(row.into())
    }

    /// Append a user-authored message.
    pub async fn insert_user(
        &self,
        collaboration_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> AppResult<ChatMessage> {
        let row = sqlx::query_as::<_, ChatMessageRow>(
            "INSERT INTO chat_messages (collaboration_id, sender_id, message_type, content) \
             VALUES ($1, $2, 'user', $3) \
             RETURNING id, collaboration_id, sender_id, message_type, content, created_at",
        )
        .bind(collaboration_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db)?;

        Ok(row.into())
    }

    /// List a collaboration's messages, oldest first.
    pub async fn list(
        &self,
        collaboration_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChatMessage>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages WHERE collaboration_id = $1")
                .bind(collaboration_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db)?;

        let rows = sqlx::query_as::<_, ChatMessageRow>(
            "SELECT id, collaboration_id, sender_id, message_type, content, created_at \
             FROM chat_messages WHERE collaboration_id = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3",
        )
        .bind(collaboration_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db)?;

        Ok(PageResponse::new(
            rows.into_iter().map(ChatMessage::from).collect(),
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

fn map_db(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Chat query failed", e)
}
