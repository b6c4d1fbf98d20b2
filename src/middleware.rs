use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::info;

use crate::error::ApiError;

pub const JSONAPI_MIME: &str = "application/vnd.api+json";

/// JSON:API content negotiation: every request must declare the JSON:API
/// media type on Content-Type, and every response carries it back. Requests
/// without it are rejected before reaching any route.
pub async fn require_jsonapi(req: Request, next: Next) -> Response {
    let declared = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == JSONAPI_MIME)
        .unwrap_or(false);

    let mut response = if declared {
        next.run(req).await
    } else {
        ApiError::bad_request().into_response()
    };

    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSONAPI_MIME));

    response
}

/// axum's method router answers a known path with an unsupported verb with
/// an empty 405 carrying the computed Allow header. Swap in the JSON:API
/// error body and keep that header.
pub async fn method_not_allowed(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();

    let body = json!({"errors": {"detail": "Not Allowed"}});
    let mut rewritten = (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }

    rewritten
}

pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    let status = response.status().as_u16();

    info!(
        method = %method,
        url = %uri,
        status = status,
        "HTTP request"
    );

    response
}
