pub mod contact;
pub mod conversation;
pub mod events;
pub mod message;
pub mod provisioning;
pub mod timestamp;
pub mod user;

pub use contact::{Contact, ContactEntry, CreateContactRequest};
pub use conversation::{Conversation, ConversationWithMessages};
pub use events::StreamEvent;
pub use message::{Message, SendMessageRequest};
pub use provisioning::{ProvisionedUser, ProvisioningEvent};
pub use timestamp::Timestamp;
pub use user::User;
