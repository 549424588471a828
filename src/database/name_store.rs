// Backend-agnostic access to the stored names

use std::sync::Arc;
use anyhow::Result;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::environment::{EnvironmentVariables, StorageBackend};
use crate::database::{MemoryStore, PostgresStore, RedisStore};
use crate::models::Name;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("name '{0}' already exists")]
    Duplicate(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Name storage selected by `STORAGE_BACKEND`. Cloning shares the backend.
#[derive(Clone, Debug)]
pub enum NameStore {
    Memory(MemoryStore),
    Postgres(PostgresStore),
    Redis(RedisStore),
}

impl NameStore {
    /// Builds and initializes the configured backend
    pub async fn connect(env: Arc<EnvironmentVariables>) -> Result<Self> {
        let store: NameStore = match env.storage_backend {
            StorageBackend::Memory => NameStore::Memory(MemoryStore::new()),
            StorageBackend::Postgres => {
                let store: PostgresStore = PostgresStore::new(env.clone());
                store.initialize().await?;
                NameStore::Postgres(store)
            }
            StorageBackend::Redis => {
                let store: RedisStore = RedisStore::new(env.clone())?;
                store.initialize().await?;
                NameStore::Redis(store)
            }
        };

        info!("Name storage ready ({})", store.kind());
        Ok(store)
    }

    pub fn kind(&self) -> StorageBackend {
        match self {
            NameStore::Memory(_) => StorageBackend::Memory,
            NameStore::Postgres(_) => StorageBackend::Postgres,
            NameStore::Redis(_) => StorageBackend::Redis,
        }
    }

    pub async fn list(&self) -> Result<Vec<Name>, StoreError> {
        match self {
            NameStore::Memory(store) => Ok(store.list().await),
            NameStore::Postgres(store) => Ok(store.list().await?),
            NameStore::Redis(store) => Ok(store.list().await?),
        }
    }

    /// Stores an already validated name
    pub async fn insert(&self, name: &str) -> Result<Name, StoreError> {
        match self {
            NameStore::Memory(store) => store.insert(name).await,
            NameStore::Postgres(store) => store.insert(name).await,
            NameStore::Redis(store) => store.insert(name).await,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Name>, StoreError> {
        match self {
            NameStore::Memory(store) => Ok(store.get(id).await),
            NameStore::Postgres(store) => Ok(store.get(id).await?),
            NameStore::Redis(store) => Ok(store.get(id).await?),
        }
    }

    pub async fn remove(&self, id: Uuid) -> Result<Option<Name>, StoreError> {
        match self {
            NameStore::Memory(store) => Ok(store.remove(id).await),
            NameStore::Postgres(store) => Ok(store.remove(id).await?),
            NameStore::Redis(store) => Ok(store.remove(id).await?),
        }
    }

    pub async fn ping(&self) -> Result<()> {
        match self {
            NameStore::Memory(_) => Ok(()),
            NameStore::Postgres(store) => store.ping().await,
            NameStore::Redis(store) => store.ping().await,
        }
    }

    pub async fn shutdown(&self) {
        match self {
            NameStore::Memory(_) => {}
            NameStore::Postgres(store) => store.shutdown().await,
            NameStore::Redis(store) => store.shutdown().await,
        }
    }
}

impl Default for NameStore {
    fn default() -> Self {
        NameStore::Memory(MemoryStore::new())
    }
}
