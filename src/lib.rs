// Library root for the names API

pub mod api;
pub mod config;
pub mod core;
pub mod database;
pub mod models;
pub mod utils;

pub use crate::config::environment::{EnvironmentVariables, StorageBackend};
pub use crate::config::state::AppState;
pub use crate::core::server::create_app;
pub use crate::database::{NameStore, StoreError};
pub use crate::models::{Name, NewName};
