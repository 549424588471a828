// Global error handling: layer errors, the error middleware and the fallback route

use std::any::Any;
use std::error::Error;
use std::panic::AssertUnwindSafe;

use axum::{
    body::Body,
    http::{header::ALLOW, Method, Request, Response, StatusCode, Uri},
    middleware::Next,
    response::IntoResponse,
    BoxError,
};
use futures::FutureExt;
// Axum uses http_body_util for length-limiting
use http_body_util::{BodyExt, LengthLimitError};
// tower's error type for timeouts
use tower::timeout::error::Elapsed;
use tracing::{error, warn};

use crate::utils::response_handler::{status_label, HandlerResponse};

/// Maps errors raised by tower layers (timeout, body limit) to HTTP responses
pub async fn handle_global_error(err: BoxError) -> HandlerResponse {
    // 413 if the body was too large
    if find_cause::<LengthLimitError>(&*err).is_some() {
        return HandlerResponse::new(StatusCode::PAYLOAD_TOO_LARGE)
            .error("payload_too_large")
            .message("Request body too large");
    }

    // 408 if the request took too long
    if find_cause::<Elapsed>(&*err).is_some() {
        return HandlerResponse::new(StatusCode::REQUEST_TIMEOUT)
            .error("request_timeout")
            .message("Request timed out");
    }

    error!("Unhandled layer error: {}", err);

    HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
        .error("internal_error")
        .message("Unhandled internal error")
}

/// Finds a specific error type in the error or anywhere in its source chain
pub fn find_cause<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    let mut current: Option<&'a (dyn Error + 'static)> = Some(err);

    while let Some(e) = current {
        if let Some(typed) = e.downcast_ref::<T>() {
            return Some(typed);
        }
        current = e.source();
    }

    None
}

/// Middleware registered ahead of the router.
/// Turns handler panics into 500s and rewrites bare error responses
/// (extractor rejections, 405s) into `HandlerResponse`s so the envelope
/// carries the original message.
pub async fn error_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let method: Method = req.method().clone();
    let path: String = req.uri().path().to_owned();

    let response: Response<Body> = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            error!(%method, %path, "Handler panicked: {}", panic_message(&*panic));
            return HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
                .error("internal_error")
                .message("Unexpected error while handling the request")
                .into_response();
        }
    };

    let status: StatusCode = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), "Request failed");
    } else {
        warn!(%method, %path, status = status.as_u16(), "Request rejected");
    }

    // Already shaped by a handler or by handle_global_error
    if response.extensions().get::<HandlerResponse>().is_some() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let detail: String = match body.collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).trim().to_string(),
        Err(e) => {
            warn!("Failed to read error body: {}", e);
            String::new()
        }
    };

    let error: String = if detail.is_empty() {
        status_label(parts.status).to_lowercase()
    } else {
        detail
    };

    let mut rebuilt: Response<Body> = HandlerResponse::new(parts.status)
        .error(error)
        .message(parts.status.canonical_reason().unwrap_or("Request failed"))
        .into_response();

    if let Some(allow) = parts.headers.get(ALLOW) {
        rebuilt.headers_mut().insert(ALLOW, allow.clone());
    }

    rebuilt
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// 404 for any path no route matched
pub async fn fallback_handler(uri: Uri) -> HandlerResponse {
    HandlerResponse::new(StatusCode::NOT_FOUND)
        .data(serde_json::json!({
            "error": "route_not_found",
            "path": uri.path(),
        }))
        .message("The requested route does not exist")
}
