//! tests/common/mod.rs
//! Shared helpers to spawn the app on an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{serve, Router};
use names_api::{create_app, AppState, EnvironmentVariables, NameStore};
use serde_json::Value;
use tokio::net::TcpListener as TokioTcpListener;

/// Spawns the app with default settings and in-memory storage.
pub async fn spawn_app() -> String {
    spawn_app_with(&[]).await
}

/// Spawns the app with the given environment overrides and returns its base URL.
pub async fn spawn_app_with(overrides: &[(&str, &str)]) -> String {
    let vars: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let env: EnvironmentVariables =
        EnvironmentVariables::from_map(&vars).expect("Invalid test environment");
    let state: AppState = AppState::new(Arc::new(env), NameStore::default());

    // * Build the application exactly as the binary does.
    let app: Router = create_app(state);

    // * Bind an ephemeral port.
    let listener: TokioTcpListener = TokioTcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let addr: std::net::SocketAddr = listener.local_addr().unwrap();

    // * Spawn the server in a background task.
    tokio::spawn(async move {
        serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

/// Reads a response body as JSON.
pub async fn json_body(resp: reqwest::Response) -> Value {
    let body: String = resp.text().await.expect("Failed to read body");
    serde_json::from_str(&body).expect("Body is not JSON")
}
