use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Message, Timestamp};

/// The single persistent thread joining exactly two users.
///
/// Invariant: at most one conversation exists per unordered participant
/// pair. Participant order carries no meaning; lookups match either order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Conversation {
    /// Unique identifier, generated at creation.
    pub id: Uuid,

    /// First participant (order is not semantically meaningful).
    pub user_a_id: String,

    /// Second participant.
    pub user_b_id: String,

    /// When the conversation was created.
    pub created_at: Timestamp,

    /// Recency marker, updated by the send pipeline on every message.
    pub last_message_at: Timestamp,
}

impl Conversation {
    /// Whether the given user is one of the two participants.
    #[must_use]
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.user_a_id == user_id || self.user_b_id == user_id
    }
}

/// Response for `getConversationWithMessages`: the conversation plus its
/// full message log in ascending `sent_at` order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ConversationWithMessages {
    /// The resolved conversation.
    #[serde(flatten)]
    pub conversation: Conversation,

    /// Messages ordered by `(sent_at, id)` ascending.
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_has_participant_matches_either_side() {
        let now = Timestamp(Utc::now());
        let conversation = Conversation {
            id: Uuid::new_v4(),
            user_a_id: "user_a".into(),
            user_b_id: "user_b".into(),
            created_at: now.clone(),
            last_message_at: now,
        };

        assert!(conversation.has_participant("user_a"));
        assert!(conversation.has_participant("user_b"));
        assert!(!conversation.has_participant("user_c"));
    }
}
