// Service status endpoint

use axum::{extract::State, http::StatusCode};
use serde_json::json;
use tracing::{instrument, warn};

use crate::config::state::AppState;
use crate::utils::response_handler::HandlerResponse;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns API status, storage health and the answering instance
#[instrument(skip(state))]
pub async fn status_handler(State(state): State<AppState>) -> HandlerResponse {
    let storage: &'static str = state.names.kind().as_str();
    let instance: String = get_instance_identifier();
    let environment: &str = &state.environment.environment;

    match state.names.ping().await {
        Ok(()) => HandlerResponse::new(StatusCode::OK)
            .data(json!({
                "version": VERSION,
                "status": "healthy",
                "environment": environment,
                "storage": storage,
                "instance": instance,
            }))
            .message("API is running successfully"),
        Err(e) => {
            warn!("Storage ping failed: {:#}", e);
            HandlerResponse::new(StatusCode::SERVICE_UNAVAILABLE)
                .data(json!({
                    "version": VERSION,
                    "status": "unhealthy",
                    "environment": environment,
                    "storage": storage,
                    "instance": instance,
                    "error": e.to_string(),
                }))
                .message("Storage backend unavailable")
        }
    }
}

/// Identifies this application instance
fn get_instance_identifier() -> String {
    // Docker sets HOSTNAME to the container ID
    if let Ok(hostname) = std::env::var("HOSTNAME") {
        if hostname.len() >= 12 && hostname.chars().all(|c: char| c.is_ascii_hexdigit()) {
            return format!("container_{}", &hostname[..12]);
        }
        if !hostname.is_empty() {
            return format!("host_{}", hostname);
        }
    }

    if let Ok(hostname) = hostname::get() {
        if let Some(hostname_str) = hostname.to_str() {
            return format!("host_{}", hostname_str);
        }
    }

    format!("process_{}", std::process::id())
}
