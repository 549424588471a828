// Names controller

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::state::AppState;
use crate::database::StoreError;
use crate::models::NewName;
use crate::utils::response_handler::HandlerResponse;

/// Lists every stored name, oldest first
#[instrument(name = "get_names", skip(state))]
pub async fn get_names(State(state): State<AppState>) -> HandlerResponse {
    match state.names.list().await {
        Ok(names) => {
            info!("Retrieved {} names", names.len());
            HandlerResponse::new(StatusCode::OK)
                .data(json!({ "count": names.len(), "names": names }))
                .message("Names retrieved successfully")
        }
        Err(e) => storage_failure("list names", e),
    }
}

/// Validates and stores a new name
#[instrument(name = "add_name", skip(state, request))]
pub async fn add_name(
    State(state): State<AppState>,
    Json(request): Json<NewName>,
) -> HandlerResponse {
    let name: String = match request.validate() {
        Ok(name) => name,
        Err(e) => {
            warn!("Rejected name: {}", e);
            return HandlerResponse::new(StatusCode::BAD_REQUEST)
                .error(e.to_string())
                .message("Invalid name provided");
        }
    };

    match state.names.insert(&name).await {
        Ok(record) => {
            info!("Added name {} ({})", record.name, record.id);
            HandlerResponse::new(StatusCode::CREATED)
                .data(json!(record))
                .message("Name added successfully")
        }
        Err(StoreError::Duplicate(existing)) => {
            warn!("Name '{}' already exists", existing);
            HandlerResponse::new(StatusCode::CONFLICT)
                .data(json!({ "error": "name_already_exists", "name": existing }))
                .message("Name already exists")
        }
        Err(e) => storage_failure("add name", e),
    }
}

#[instrument(name = "get_name", skip(state))]
pub async fn get_name(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HandlerResponse {
    match state.names.get(id).await {
        Ok(Some(name)) => HandlerResponse::new(StatusCode::OK)
            .data(json!(name))
            .message("Name retrieved successfully"),
        Ok(None) => name_not_found(id),
        Err(e) => storage_failure("get name", e),
    }
}

#[instrument(name = "delete_name", skip(state))]
pub async fn delete_name(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HandlerResponse {
    match state.names.remove(id).await {
        Ok(Some(name)) => {
            info!("Deleted name {} ({})", name.name, name.id);
            HandlerResponse::new(StatusCode::OK)
                .data(json!(name))
                .message("Name deleted successfully")
        }
        Ok(None) => name_not_found(id),
        Err(e) => storage_failure("delete name", e),
    }
}

fn name_not_found(id: Uuid) -> HandlerResponse {
    HandlerResponse::new(StatusCode::NOT_FOUND)
        .data(json!({ "error": "name_not_found", "id": id }))
        .message("Name not found")
}

fn storage_failure(action: &str, e: StoreError) -> HandlerResponse {
    error!("Failed to {}: {:#}", action, e);

    HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
        .data(json!({
            "error": "storage_error",
            "details": e.to_string()
        }))
        .message(format!("Failed to {action}"))
}
