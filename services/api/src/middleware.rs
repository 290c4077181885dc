//! Cross-cutting request handling shared by every route.
//!
//! [`apply`] wraps a router in one explicit stack. Layers run outermost first:
//!
//! 1. request logging: one `[SERVER] METHOD PATH` line per request, written before
//!    anything else runs so it fires for preflights, rejections and faults alike
//! 2. CORS: every response carries the allow-origin header, faults included, and
//!    `OPTIONS` requests are answered here without reaching a handler
//! 3. panic recovery: a panicking handler becomes a 500 `internal_error` response
//! 4. JSON body parsing: JSON bodies are parsed once into [`JsonBody`]; malformed or
//!    oversized bodies are rejected before a handler sees them

use axum::body::{Body, HttpBody};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::{from_fn, from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use form_intake::config::HttpConfig;
use form_intake::error::RequestError;
use form_intake::telemetry::REQUEST_LOG_TARGET;
use http_body_util::LengthLimitError;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::{debug, error, info};

/// Fixed tag prefixed to every request log line.
pub const REQUEST_LOG_TAG: &str = "[SERVER]";

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub body_limit_bytes: usize,
}

impl From<&HttpConfig> for MiddlewareConfig {
    fn from(config: &HttpConfig) -> Self {
        Self {
            body_limit_bytes: config.body_limit_bytes,
        }
    }
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self::from(&HttpConfig::default())
    }
}

/// Parsed JSON request body, available to handlers as a request extension.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Arc<Value>);

#[derive(Debug, Clone, Copy)]
struct BodyLimit(usize);

pub fn apply(router: Router, config: &MiddlewareConfig) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(from_fn(log_request))
            .layer(cors_layer())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(from_fn_with_state(
                BodyLimit(config.body_limit_bytes),
                parse_json_body,
            )),
    )
}

async fn log_request(request: Request, next: Next) -> Response {
    info!(
        target: REQUEST_LOG_TARGET,
        "{} {} {}",
        REQUEST_LOG_TAG,
        request.method(),
        request.uri().path()
    );
    let response = next.run(request).await;
    debug!(status = %response.status(), "request completed");
    response
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(detail, "handler panicked");
    RequestError::Internal.into_response()
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin)
}

async fn parse_json_body(
    State(BodyLimit(limit)): State<BodyLimit>,
    request: Request,
    next: Next,
) -> Response {
    if !declares_json(request.headers()) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    if body.size_hint().lower() > limit as u64 {
        return RequestError::PayloadTooLarge { limit }.into_response();
    }

    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(err) => {
            let err = err.into_inner();
            if err.is::<LengthLimitError>() {
                return RequestError::PayloadTooLarge { limit }.into_response();
            }
            debug!(%err, "unable to buffer request body");
            return RequestError::MalformedBody(format!("unable to read body: {err}"))
                .into_response();
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return next.run(Request::from_parts(parts, Body::empty())).await;
    }

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value) => {
            parts.extensions.insert(JsonBody(Arc::new(value)));
            next.run(Request::from_parts(parts, Body::from(bytes))).await
        }
        Err(err) => {
            debug!(%err, "rejecting malformed JSON body");
            RequestError::MalformedBody(err.to_string()).into_response()
        }
    }
}

fn declares_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };

    mime.type_() == "application"
        && (mime.subtype() == "json" || mime.suffix().is_some_and(|name| name == "json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn recognises_json_content_types() {
        assert!(declares_json(&headers_with("application/json")));
        assert!(declares_json(&headers_with("application/json; charset=utf-8")));
        assert!(declares_json(&headers_with("application/problem+json")));
        assert!(!declares_json(&headers_with("text/plain")));
        assert!(!declares_json(&headers_with("application/x-www-form-urlencoded")));
        assert!(!declares_json(&HeaderMap::new()));
    }

    #[test]
    fn panic_payloads_become_internal_errors() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        let response = panic_response(Box::new(String::from("boom")));
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
