use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Timestamp, User};

/// A directed contact edge between two users.
///
/// Contact relationships are symmetric: adding a contact inserts the edge in
/// both directions inside one transaction. The primary key is the ordered
/// pair, and self-edges are rejected before any insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Contact {
    /// The user who owns this contact list entry.
    pub owner_id: String,

    /// The user being pointed at.
    pub contact_id: String,

    /// When the edge was created.
    pub created_at: Timestamp,
}

/// A contact edge joined with the mirrored profile of the contact user,
/// as returned by the `listContacts` operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ContactEntry {
    /// The contact edge itself.
    #[serde(flatten)]
    pub contact: Contact,

    /// Profile of the user the edge points at.
    pub user: User,
}

/// Request body for `createContact`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CreateContactRequest {
    /// Email address of the user to add; must resolve to a provisioned user.
    pub email: String,
}
