// Application state shared by every handler

use std::sync::Arc;
use crate::config::environment::EnvironmentVariables;
use crate::database::NameStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub names: NameStore,
}

impl AppState {
    /// Creates state around an already connected store
    pub fn new(environment: Arc<EnvironmentVariables>, names: NameStore) -> Self {
        Self { environment, names }
    }

    /// Connects the configured storage backend
    pub async fn initialize(environment: Arc<EnvironmentVariables>) -> anyhow::Result<Self> {
        let names: NameStore = NameStore::connect(environment.clone()).await?;

        tracing::info!("Application state initialized ({} storage)", names.kind());
        Ok(Self::new(environment, names))
    }

    /// Gracefully release storage connections
    pub async fn shutdown(&self) {
        self.names.shutdown().await;
    }
}
