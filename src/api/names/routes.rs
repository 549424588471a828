// Names route definitions

use axum::{
    routing::get,
    Router,
};

use crate::config::state::AppState;
use super::handler;

/// Creates router with the names endpoints
pub fn names_routes() -> Router<AppState> {
    Router::new()
        .route("/names", get(handler::get_names).post(handler::add_name))
        .route("/names/{id}", get(handler::get_name).delete(handler::delete_name))
}
