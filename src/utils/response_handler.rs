// Unified response system for consistent API responses
// Provides HandlerResponse and the middleware that wraps every response in ResponseFormat

use axum::{
    body::Body,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        response::Parts,
        HeaderValue, Request, Response, StatusCode,
    },
    middleware::Next,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::convert::Infallible;
use tracing::{debug, error};

use crate::utils::utils::to_two_space_indented_json;

/// Standard JSON response format for all API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub status: String,        // HTTP status text (e.g. "OK", "NOT_FOUND")
    pub code: u16,             // HTTP status code
    pub data: Value,           // Response payload
    pub messages: Vec<String>, // Informational messages
    pub date: String,          // ISO timestamp
}

/// Convenience struct for building responses in handlers
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    pub status_code: StatusCode,
    pub data: Value,
    pub messages: Vec<String>,
}

impl HandlerResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            data: Value::Null,
            messages: Vec::new(),
        }
    }

    /// Adds JSON data payload to the response
    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Sets `{ "error": ... }` as the payload
    pub fn error(self, error: impl Into<String>) -> Self {
        self.data(json!({ "error": error.into() }))
    }

    /// Adds an informational message to the response
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response: Response<Body> = Json(json!({
            "data": self.data,
            "messages": self.messages
        })).into_response();

        *response.status_mut() = self.status_code;

        // Store HandlerResponse in extensions for middleware processing
        response.extensions_mut().insert(self);
        response
    }
}

/// "Not Found" -> "NOT_FOUND"
pub fn status_label(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN STATUS")
        .to_uppercase()
        .replace(' ', "_")
}

/// Extracts response data and messages from HandlerResponse extensions
fn extract_response_components(response: &Response<Body>) -> (Vec<String>, Value) {
    match response.extensions().get::<HandlerResponse>() {
        Some(r) => (r.messages.clone(), r.data.clone()),
        None => (Vec::new(), Value::Null),
    }
}

fn log_formatted_response(wrapped: &ResponseFormat) {
    match to_two_space_indented_json(wrapped) {
        Ok(spaced_json) => debug!("\nFinal response:\n{}", spaced_json),
        Err(err) => error!("Failed to format response JSON: {:?}", err),
    }
}

/// Builds the final response with JSON content type
fn build_final_response(mut parts: Parts, wrapped: &ResponseFormat) -> Response<Body> {
    let json_body: Vec<u8> = serde_json::to_vec(wrapped).unwrap_or_else(|_| b"{}".to_vec());

    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Response::from_parts(parts, Body::from(json_body))
}

/// Middleware that wraps all responses in the standard ResponseFormat structure
pub async fn response_wrapper(
    req: Request<Body>,
    next: Next,
) -> Result<Response<Body>, Infallible> {
    let response: Response<Body> = next.run(req).await;

    let (messages, data) = extract_response_components(&response);
    let (parts, _) = response.into_parts();

    let wrapped: ResponseFormat = ResponseFormat {
        status: status_label(parts.status),
        code: parts.status.as_u16(),
        data,
        messages,
        date: Utc::now().to_rfc3339(),
    };

    log_formatted_response(&wrapped);

    Ok(build_final_response(parts, &wrapped))
}
