use std::sync::Arc;

use axum::extract::{Extension, Json};
use axum::http::{HeaderMap, StatusCode};
use shared::config::server::Config;
use shared::models::ProvisioningEvent;
use tracing::{info, instrument};

use crate::app_state::AppState;
use crate::http::error::{ApiError, AppResult};
use crate::http::problem::ProblemDetails;
use crate::services::UserService;

use super::require_pool;

/// Identity-provider webhook mirroring user profiles into local storage.
///
/// Guarded by a shared secret rather than a session: the caller is the
/// provider's backend, not a browser.
#[utoipa::path(
    post,
    path = "/api/webhooks/provisioning",
    request_body = ProvisioningEvent,
    responses(
        (status = 204, description = "Event applied"),
        (status = 401, description = "Missing or wrong webhook secret", body = ProblemDetails)
    ),
    tag = "Provisioning"
)]
#[instrument(skip_all)]
pub async fn handle_provisioning_event(
    Extension(config): Extension<Arc<Config>>,
    Extension(app_state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Json(event): Json<ProvisioningEvent>,
) -> AppResult<StatusCode> {
    verify_secret(&config, &headers)?;
    let pool = require_pool(&app_state)?;
    let users = UserService::new(pool);

    match event {
        ProvisioningEvent::UserCreated(user) | ProvisioningEvent::UserUpdated(user) => {
            users.upsert(&user).await?;
        }
        ProvisioningEvent::UserDeleted { id } => {
            let removed = users.delete(&id).await?;
            info!(user = %id, removed, "processed user deletion");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

fn verify_secret(config: &Config, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = config.provisioning.secret.as_str();
    if expected.is_empty() {
        return Err(ApiError::unauthorized("provisioning webhook is disabled"));
    }

    let presented = headers
        .get(config.provisioning.secret_header.as_str())
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if presented != expected {
        return Err(ApiError::unauthorized("invalid webhook secret"));
    }
    Ok(())
}
