use std::sync::Arc;

use crate::hub::BroadcastHub;

/// Application state shared across all routes.
///
/// The hub is constructed once per process and injected here rather than
/// living in a global; its lifetime is the lifetime of the router.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. `None` only in router-level tests.
    pub pool: Option<sqlx::PgPool>,

    /// The process-wide broadcast hub for message fan-out.
    pub hub: Arc<BroadcastHub>,
}

impl AppState {
    pub fn new(pool: Option<sqlx::PgPool>, hub: Arc<BroadcastHub>) -> Self {
        Self { pool, hub }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("has_pool", &self.pool.is_some())
            .field("listeners", &self.hub.listener_count())
            .finish()
    }
}
