use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Timestamp;

/// Represents a user mirrored from the external identity provider.
///
/// User identifiers are opaque strings issued by the provider; Courier never
/// mints them itself. Rows are created and updated exclusively by
/// provisioning events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct User {
    /// Opaque identifier issued by the identity provider.
    pub id: String,

    /// The user's display name.
    pub name: String,

    /// The user's email address.
    pub email: String,

    /// When the local mirror row was created.
    pub created_at: Timestamp,
}
