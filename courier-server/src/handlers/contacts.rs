use std::sync::Arc;

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use shared::models::{ContactEntry, CreateContactRequest};
use tracing::instrument;

use crate::app_state::AppState;
use crate::http::error::{ApiError, AppResult};
use crate::http::problem::ProblemDetails;
use crate::middleware::request_context::RequestContext;
use crate::services::ContactService;

use super::require_pool;

#[utoipa::path(
    get,
    path = "/api/contacts",
    responses(
        (status = 200, description = "Contact roster for the caller", body = Vec<ContactEntry>),
        (status = 401, description = "Missing session", body = ProblemDetails)
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn list_contacts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(context): Extension<RequestContext>,
) -> AppResult<Json<Vec<ContactEntry>>> {
    let user_id = context
        .user_id
        .ok_or_else(|| ApiError::unauthorized("missing session"))?;
    let pool = require_pool(&app_state)?;

    let contacts = ContactService::new(pool).list(&user_id).await?;
    Ok(Json(contacts))
}

#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact added", body = ContactEntry),
        (status = 404, description = "No user with that email", body = ProblemDetails),
        (status = 409, description = "Already a contact, or self-add", body = ProblemDetails)
    ),
    tag = "Contacts"
)]
#[instrument(skip_all)]
pub async fn create_contact(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(context): Extension<RequestContext>,
    Json(request): Json<CreateContactRequest>,
) -> AppResult<(StatusCode, Json<ContactEntry>)> {
    let user_id = context
        .user_id
        .ok_or_else(|| ApiError::unauthorized("missing session"))?;
    let pool = require_pool(&app_state)?;

    let entry = ContactService::new(pool)
        .create(&user_id, &request.email)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
