// Start of file: src/main.rs

use std::sync::Arc;
use axum::{serve, Router};
use tokio::net::TcpListener;
use tracing::info;

use names_api::config::{environment::EnvironmentVariables, state::AppState};
use names_api::core::{
    logging::init_tracing,
    server::{create_app, setup_listener, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let env: Arc<EnvironmentVariables> = Arc::new(EnvironmentVariables::instance()?.clone());
    let state: AppState = AppState::initialize(env.clone()).await?;
    let app: Router = create_app(state.clone());

    // Tests build the app without binding a port
    if env.test_environment {
        info!("TEST_ENVIRONMENT is set, not listening");
        state.shutdown().await;
        return Ok(());
    }

    let listener: TcpListener = setup_listener(&env).await?;
    info!("Server listening on: {}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;
    info!("Server stopped");

    Ok(())
}

// End of file: src/main.rs
