pub mod contacts;
pub mod conversations;
pub mod messages;
pub mod provisioning;
pub mod streaming;

use std::sync::Arc;

use crate::app_state::AppState;
use crate::http::error::ApiError;

/// Handlers that hit storage need a live pool; router-level tests run
/// without one and should fail loudly instead of pretending.
pub(crate) fn require_pool(app_state: &Arc<AppState>) -> Result<sqlx::PgPool, ApiError> {
    app_state
        .pool
        .clone()
        .ok_or_else(|| ApiError::internal_server_error("database is not configured"))
}
