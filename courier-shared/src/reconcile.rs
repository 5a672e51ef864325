//! Client-side reconciliation of durable query results with streamed events.
//!
//! The subscription stream is a single global channel: every client receives
//! every message and filters by conversation locally. Deliveries are
//! therefore at-least-once from the client's point of view, and the query
//! path races the stream path. This reducer makes the merged view converge
//! regardless of arrival order: union by message id, then resort by
//! `(sent_at, id)`.
//!
//! The type is deliberately independent of any UI framework; a frontend
//! feeds it events and re-renders from `messages_for`.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Message, StreamEvent};

/// Per-conversation ordered message state, keyed by conversation id.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    conversations: HashMap<Uuid, Vec<Message>>,
}

impl ChatState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages for one conversation in `(sent_at, id)` ascending order.
    /// Empty when the conversation is unknown.
    #[must_use]
    pub fn messages_for(&self, conversation_id: &Uuid) -> &[Message] {
        self.conversations
            .get(conversation_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Reducer step for one incoming stream event.
    ///
    /// `Connected` acknowledgments carry no state. A streamed message whose
    /// id is already present is ignored, which is what turns the hub's
    /// at-least-once delivery into an exactly-once view. Returns `true` when
    /// the state changed.
    pub fn apply_event(&mut self, event: StreamEvent) -> bool {
        match event {
            StreamEvent::Connected => false,
            StreamEvent::Message { message } => self.insert(message),
        }
    }

    /// Merge a point-in-time query result into the local state.
    ///
    /// The union of the query result and any locally streamed messages is
    /// deduplicated by id and fully resorted, so merging is idempotent and
    /// insensitive to which path delivered a message first.
    pub fn merge_history(&mut self, conversation_id: Uuid, history: Vec<Message>) {
        let entry = self.conversations.entry(conversation_id).or_default();
        for message in history {
            if !entry.iter().any(|m| m.id == message.id) {
                entry.push(message);
            }
        }
        entry.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }

    fn insert(&mut self, message: Message) -> bool {
        let entry = self.conversations.entry(message.conversation_id).or_default();
        if entry.iter().any(|m| m.id == message.id) {
            return false;
        }
        entry.push(message);
        entry.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        true
    }
}
