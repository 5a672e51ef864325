//! Durable message store.
//!
//! Messages are append-only and totally ordered within a conversation by
//! `(sent_at, id)`; the id tie-break makes the order deterministic even
//! when two rows share a timestamp.

use chrono::{DateTime, Utc};
use shared::models::{Message, Timestamp};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::ServiceResult;

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    conversation_id: Uuid,
    sender_id: String,
    content: String,
    sent_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.id,
            conversation_id: row.conversation_id,
            sender_id: row.sender_id,
            content: row.content,
            sent_at: Timestamp(row.sent_at),
            read_at: row.read_at.map(Timestamp),
        }
    }
}

/// Append-only store for conversation messages.
#[derive(Debug, Clone)]
pub struct MessageService {
    pool: PgPool,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends a message, assigning its id and send timestamp server-side.
    #[instrument(name = "message.append", skip(self, content), err)]
    pub async fn append(
        &self,
        conversation_id: Uuid,
        sender_id: &str,
        content: &str,
    ) -> ServiceResult<Message> {
        let row = sqlx::query_as::<_, MessageRow>(
            "INSERT INTO messages (id, conversation_id, sender_id, content, sent_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, conversation_id, sender_id, content, sent_at, read_at",
        )
        .bind(Uuid::new_v4())
        .bind(conversation_id)
        .bind(sender_id)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(Message::from(row))
    }

    /// Full message log for a conversation, oldest first.
    #[instrument(name = "message.list", skip(self), err)]
    pub async fn list_by_conversation(&self, conversation_id: Uuid) -> ServiceResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT id, conversation_id, sender_id, content, sent_at, read_at
             FROM messages
             WHERE conversation_id = $1
             ORDER BY sent_at ASC, id ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Message::from).collect())
    }

    /// Advances the conversation's activity timestamp after an append.
    #[instrument(name = "message.touch_conversation", skip(self), err)]
    pub async fn touch_conversation(
        &self,
        conversation_id: Uuid,
        last_message_at: &Timestamp,
    ) -> ServiceResult<()> {
        sqlx::query(
            "UPDATE conversations
             SET last_message_at = $2
             WHERE id = $1 AND last_message_at < $2",
        )
        .bind(conversation_id)
        .bind(last_message_at.0)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
