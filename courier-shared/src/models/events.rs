use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Message;

/// Event envelope carried over the message subscription stream.
///
/// Exactly two variants exist and consumers are expected to match them
/// exhaustively. The hub publishes every message to every listener; a
/// `Message` event is not filtered by conversation on the server side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Emitted once when the subscription is established.
    Connected,

    /// A newly persisted message.
    Message {
        /// The persisted message, identical to the row returned to the
        /// sender.
        message: Message,
    },
}
