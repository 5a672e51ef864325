use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use shared::models::ConversationWithMessages;
use tracing::instrument;

use crate::app_state::AppState;
use crate::http::error::{ApiError, AppResult};
use crate::http::problem::ProblemDetails;
use crate::middleware::request_context::RequestContext;
use crate::services::ConversationService;

use super::require_pool;

#[utoipa::path(
    get,
    path = "/api/conversations/{contact_id}",
    params(
        ("contact_id" = String, Path, description = "The other participant's user id")
    ),
    responses(
        (status = 200, description = "Conversation with its ordered message log",
            body = ConversationWithMessages),
        (status = 404, description = "No conversation with this contact yet", body = ProblemDetails)
    ),
    tag = "Conversations"
)]
#[instrument(skip_all, fields(contact = %contact_id))]
pub async fn get_conversation_with_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(context): Extension<RequestContext>,
    Path(contact_id): Path<String>,
) -> AppResult<Json<ConversationWithMessages>> {
    let user_id = context
        .user_id
        .ok_or_else(|| ApiError::unauthorized("missing session"))?;
    let pool = require_pool(&app_state)?;

    let conversation = ConversationService::new(pool)
        .get_with_messages(&user_id, &contact_id)
        .await?;
    Ok(Json(conversation))
}
