use shared::models::{
    Contact, ContactEntry, Conversation, ConversationWithMessages, CreateContactRequest, Message,
    ProvisionedUser, ProvisioningEvent, SendMessageRequest, StreamEvent, User,
};
use utoipa::OpenApi;

use crate::http::problem::ProblemDetails;

#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Courier API",
        version = "1.0.0",
        description = "Direct-messaging backend: contacts, conversations, and real-time delivery"
    ),
    paths(
        crate::handlers::contacts::list_contacts,
        crate::handlers::contacts::create_contact,
        crate::handlers::conversations::get_conversation_with_messages,
        crate::handlers::messages::send_message,
        crate::handlers::streaming::stream_events,
        crate::handlers::provisioning::handle_provisioning_event,
    ),
    components(
        schemas(
            User,
            Contact,
            ContactEntry,
            CreateContactRequest,
            Conversation,
            ConversationWithMessages,
            Message,
            SendMessageRequest,
            StreamEvent,
            ProvisioningEvent,
            ProvisionedUser,
            ProblemDetails,
        )
    ),
    tags(
        (name = "Contacts", description = "Contact roster management"),
        (name = "Conversations", description = "Conversation history"),
        (name = "Messages", description = "Message send pipeline"),
        (name = "Stream", description = "Real-time event subscription"),
        (name = "Provisioning", description = "Identity-provider webhook")
    )
)]
pub struct ApiDoc;
