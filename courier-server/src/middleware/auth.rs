use axum::{
    body::Body,
    extract::Request,
    http::{self, header},
    middleware::Next,
    response::Response,
};
use cookie::Cookie;
use http::StatusCode;
use shared::config::server::Config;
use std::sync::Arc;
use tracing::Span;

use crate::middleware::request_context::RequestContext;

const DEFAULT_SESSION_COOKIE: &str = "courier_session";

/// Requires a provider-verified identity on protected routes.
///
/// Identity verification itself happens upstream: the session cookie value
/// is the opaque user id the external identity provider vouched for on this
/// request. Requests without it are rejected before reaching a handler.
/// On success the verified id is recorded into the surrounding
/// `http_request` span's `user` field.
pub async fn auth_middleware(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let cookie_name = req
        .extensions()
        .get::<Arc<Config>>()
        .map_or(DEFAULT_SESSION_COOKIE.to_string(), |config| {
            config.session.cookie_name.clone()
        });

    let user_id = extract_session_cookie(req.headers(), &cookie_name)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Span::current().record("user", tracing::field::display(&user_id));

    if let Some(context) = req.extensions_mut().get_mut::<RequestContext>() {
        context.user_id = Some(user_id);
    } else {
        req.extensions_mut().insert(RequestContext {
            request_id: String::new(),
            user_id: Some(user_id),
        });
    }

    Ok(next.run(req).await)
}

fn extract_session_cookie(headers: &http::HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(header::COOKIE)?.to_str().ok()?;
    Cookie::split_parse(value)
        .flatten()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
