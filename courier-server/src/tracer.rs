//! Per-request tracing.
//!
//! Every request runs inside one `http_request` span carrying the
//! propagated request id. The `user` field starts empty and is recorded by
//! the auth middleware after the session cookie is verified, so log lines
//! emitted from handlers and services are attributable to a caller.

use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::middleware::request_context::RequestContext;

/// Span factory reading the request id seeded by
/// [`crate::middleware::request_context::assign_request_id`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .extensions()
            .get::<RequestContext>()
            .map_or("n/a", |ctx| ctx.request_id.as_str());

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %request_id,
            user = tracing::field::Empty,
        )
    }
}

/// Trace layer wrapping every route in an `http_request` span.
pub fn create_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn span_declares_request_id_and_deferred_user_field() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut request = Request::builder()
                .uri("/api/contacts")
                .body(Body::empty())
                .unwrap();
            request.extensions_mut().insert(RequestContext {
                request_id: "req-7".into(),
                user_id: None,
            });

            let span = RequestSpan.make_span(&request);
            let metadata = span.metadata().expect("span should be enabled at info");
            let fields: Vec<&str> = metadata.fields().iter().map(|f| f.name()).collect();
            assert!(fields.contains(&"request_id"));
            assert!(fields.contains(&"user"));
        });
    }

    #[test]
    fn missing_context_falls_back_to_placeholder_id() {
        let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        // No RequestContext extension; span creation must not panic.
        let _span = RequestSpan.make_span(&request);
    }
}
