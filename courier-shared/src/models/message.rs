use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Timestamp;

/// A single message in a two-party conversation.
///
/// Messages are immutable after creation except for `read_at`. The log is
/// append-only per conversation; the ordering key is `sent_at` with `id` as
/// the tie-break, so retrieval yields a stable total order even when two
/// messages share a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Message {
    /// Unique identifier for the message.
    pub id: Uuid,

    /// The conversation this message belongs to.
    pub conversation_id: Uuid,

    /// Identifier of the sending user.
    pub sender_id: String,

    /// The message content.
    pub content: String,

    /// When the message was accepted by the server.
    pub sent_at: Timestamp,

    /// When the recipient read the message, if ever.
    pub read_at: Option<Timestamp>,
}

impl Message {
    /// The `(sent_at, id)` sort key shared by the store and the client
    /// reconciliation layer.
    #[must_use]
    pub fn sort_key(&self) -> (&Timestamp, &Uuid) {
        (&self.sent_at, &self.id)
    }
}

/// Request body for `sendMessage`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SendMessageRequest {
    /// Identifier of the recipient user.
    pub recipient_id: String,

    /// The message content; must be non-empty after trimming.
    pub content: String,

    /// Optional conversation hint. When present the sender must be a
    /// participant of the named conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<Uuid>,
}
