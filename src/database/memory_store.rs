use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::database::StoreError;
use crate::models::Name;

/// Process-local name storage.
/// Keeps insertion order; readers share the lock, inserts take it exclusively
/// so the uniqueness check and the push happen atomically.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    names: Arc<RwLock<Vec<Name>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Name> {
        self.names.read().await.clone()
    }

    pub async fn insert(&self, name: &str) -> Result<Name, StoreError> {
        let mut names = self.names.write().await;

        if names.iter().any(|existing: &Name| existing.name == name) {
            return Err(StoreError::Duplicate(name.to_string()));
        }

        let record: Name = Name::new(name);
        names.push(record.clone());
        debug!("Stored name {} ({} total)", record.id, names.len());

        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Option<Name> {
        self.names
            .read()
            .await
            .iter()
            .find(|name: &&Name| name.id == id)
            .cloned()
    }

    pub async fn remove(&self, id: Uuid) -> Option<Name> {
        let mut names = self.names.write().await;
        let position: usize = names.iter().position(|name: &Name| name.id == id)?;
        Some(names.remove(position))
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.names.read().await.len()
    }
}
