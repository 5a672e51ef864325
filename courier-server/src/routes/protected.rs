use axum::{
    Router,
    routing::{get, post},
};
use tracing::info;

use crate::handlers::{contacts, conversations, messages};

/// Routes that require a verified session. The auth middleware is layered
/// on by the caller so this module stays a plain route map.
pub fn create_router_protected() -> Router {
    info!("Creating protected router");
    Router::new()
        .route(
            "/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/conversations/{contact_id}",
            get(conversations::get_conversation_with_messages),
        )
        .route("/messages", post(messages::send_message))
}
