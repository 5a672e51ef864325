use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Profile payload attached to provisioning events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ProvisionedUser {
    /// Identifier issued by the identity provider.
    pub id: String,

    /// Display name, if the provider supplied one.
    #[serde(default)]
    pub name: Option<String>,

    /// Primary email address, if the provider supplied one.
    #[serde(default)]
    pub email: Option<String>,
}

/// A user lifecycle notification from the external identity provider.
///
/// `user.created` and `user.updated` both apply as idempotent upserts so
/// delivery retries and reordering are harmless; `user.deleted` drops the
/// user's roster edges and scrubs the mirrored profile while conversation
/// history stays intact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(tag = "type", content = "data")]
pub enum ProvisioningEvent {
    /// A new account was created upstream.
    #[serde(rename = "user.created")]
    UserCreated(ProvisionedUser),

    /// An existing account changed upstream.
    #[serde(rename = "user.updated")]
    UserUpdated(ProvisionedUser),

    /// An account was removed upstream.
    #[serde(rename = "user.deleted")]
    UserDeleted {
        /// Identifier of the deleted account.
        id: String,
    },
}
