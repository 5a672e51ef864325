use std::sync::Arc;

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use shared::config::server::Config;
use shared::models::{Message, SendMessageRequest};
use tracing::instrument;

use crate::app_state::AppState;
use crate::http::error::{ApiError, AppResult};
use crate::http::problem::ProblemDetails;
use crate::middleware::request_context::RequestContext;
use crate::services::SendPipeline;

use super::require_pool;

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message persisted and published", body = Message),
        (status = 400, description = "Empty or oversized content", body = ProblemDetails),
        (status = 403, description = "Conversation hint names a foreign conversation",
            body = ProblemDetails),
        (status = 404, description = "Hinted conversation does not exist", body = ProblemDetails)
    ),
    tag = "Messages"
)]
#[instrument(skip_all)]
pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(context): Extension<RequestContext>,
    Json(request): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let user_id = context
        .user_id
        .ok_or_else(|| ApiError::unauthorized("missing session"))?;
    let pool = require_pool(&app_state)?;

    let pipeline = SendPipeline::new(
        pool,
        Arc::clone(&app_state.hub),
        config.limits.max_message_length,
    );
    let message = pipeline.send(&user_id, &request).await?;

    metrics::counter!("courier_messages_sent_total").increment(1);
    Ok((StatusCode::CREATED, Json(message)))
}
