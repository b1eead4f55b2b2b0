//! Request ID middleware for request tracing and correlation.
//!
//! Each request carries an ID that is recorded in the tracing span, tagged
//! on the Sentry scope and echoed in the `x-request-id` response header.
//! IDs from an upstream proxy are reused when they look sane; anything else
//! is replaced with a fresh UUID v4.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = upstream_id(request.headers().get(REQUEST_ID_HEADER))
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn upstream_id(header: Option<&HeaderValue>) -> Option<String> {
    let value = header?.to_str().ok()?.trim();
    let sane = !value.is_empty()
        && value.len() <= MAX_UPSTREAM_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    sane.then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_accepted_when_sane() {
        let header = HeaderValue::from_static("cf-8a1b2c3d.edge_01");
        assert_eq!(
            upstream_id(Some(&header)).as_deref(),
            Some("cf-8a1b2c3d.edge_01")
        );
    }

    #[test]
    fn test_upstream_id_rejected_when_odd() {
        assert_eq!(upstream_id(None), None);
        assert_eq!(upstream_id(Some(&HeaderValue::from_static(""))), None);
        assert_eq!(
            upstream_id(Some(&HeaderValue::from_static("id with spaces"))),
            None
        );
        let long = HeaderValue::from_str(&"a".repeat(MAX_UPSTREAM_ID_LEN + 1)).expect("header");
        assert_eq!(upstream_id(Some(&long)), None);
    }
}
