//! Real-time subscription endpoint.
//!
//! Subscribing registers a hub listener and wraps its receiver in an SSE
//! response stream. The listener's lifetime is tied to the stream itself
//! through a guard moved into the stream closure, so client disconnect,
//! server-side stream teardown, and error paths all deregister it exactly
//! once.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Extension;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::Stream;
use shared::config::server::Config;
use shared::models::StreamEvent;
use tokio_stream::{StreamExt, wrappers::ReceiverStream};
use tracing::{debug, instrument};

use crate::app_state::AppState;
use crate::hub::SubscriptionGuard;

fn event_name(event: &StreamEvent) -> &'static str {
    match event {
        StreamEvent::Connected => "connected",
        StreamEvent::Message { .. } => "message",
    }
}

#[utoipa::path(
    get,
    path = "/api/stream",
    responses(
        (status = 200, description = "SSE stream of message events; opens with a `connected` ack")
    ),
    tag = "Stream"
)]
#[instrument(skip_all)]
pub async fn stream_events(
    Extension(config): Extension<Arc<Config>>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (handle, receiver) = app_state.hub.subscribe();
    let guard = SubscriptionGuard::new(Arc::clone(&app_state.hub), handle);
    debug!(listeners = app_state.hub.listener_count(), "stream opened");

    // The guard rides inside the closure: dropping the response stream
    // (client disconnect included) unsubscribes the listener.
    let stream = ReceiverStream::new(receiver).map(move |event| {
        let _held = &guard;
        let sse_event = Event::default().event(event_name(&event));
        let sse_event = match sse_event.json_data(&event) {
            Ok(event) => event,
            Err(_) => Event::default().event("error").data("serialization failed"),
        };
        Ok::<_, Infallible>(sse_event)
    });

    let keepalive = KeepAlive::new()
        .interval(Duration::from_secs(config.sse.keep_alive_seconds.max(1)))
        .text("keep-alive");

    Sse::new(stream).keep_alive(keepalive)
}
