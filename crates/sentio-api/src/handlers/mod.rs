//! Request handlers.

pub mod analyze;
pub mod cache;
pub mod health;
pub mod jobs;

use axum::http::HeaderMap;

/// Request id injected by the middleware, when present.
pub(crate) fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
