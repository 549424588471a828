use std::sync::Arc;
use anyhow::{Context, Result};
use redis::Client;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::environment::EnvironmentVariables;
use crate::database::StoreError;
use crate::models::Name;

/// Ordered list of JSON-encoded names
const NAMES_LIST_KEY: &str = "names:list";
/// Set of stored names, used for uniqueness
const NAMES_INDEX_KEY: &str = "names:index";

/// Name storage backed by Redis.
#[derive(Debug, Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    pub fn new(env: Arc<EnvironmentVariables>) -> Result<Self> {
        let client: Client = Client::open(env.redis_url.as_ref())
            .context("Failed to create Redis client")?;
        Ok(Self { client })
    }

    pub async fn initialize(&self) -> Result<()> {
        self.ping().await?;
        info!("Redis connection established successfully");
        Ok(())
    }

    pub async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.client.get_multiplexed_async_connection().await
            .context("Failed to get Redis multiplexed connection")
    }

    pub async fn shutdown(&self) {
        // Connections are dropped with the client
        info!("Redis store shutdown (noop)");
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await
            .context("Failed to ping Redis")?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Name>> {
        let mut conn = self.get_connection().await?;

        let raw: Vec<String> = redis::cmd("LRANGE")
            .arg(NAMES_LIST_KEY)
            .arg(0)
            .arg(-1)
            .query_async(&mut conn)
            .await
            .context("Failed to read names from Redis")?;

        Ok(decode_entries(&raw))
    }

    pub async fn insert(&self, name: &str) -> Result<Name, StoreError> {
        let mut conn = self.get_connection().await?;

        // SADD is atomic, so only one writer wins a given name
        let added: i64 = redis::cmd("SADD")
            .arg(NAMES_INDEX_KEY)
            .arg(name)
            .query_async(&mut conn)
            .await
            .context("Failed to reserve name in Redis")?;

        if added == 0 {
            return Err(StoreError::Duplicate(name.to_string()));
        }

        let record: Name = Name::new(name);
        let encoded: String = serde_json::to_string(&record)
            .context("Failed to encode name")?;

        let pushed: Result<i64, redis::RedisError> = redis::cmd("RPUSH")
            .arg(NAMES_LIST_KEY)
            .arg(&encoded)
            .query_async(&mut conn)
            .await;

        if let Err(e) = pushed {
            // Release the reservation so the name can be retried
            let released: Result<i64, redis::RedisError> = redis::cmd("SREM")
                .arg(NAMES_INDEX_KEY)
                .arg(name)
                .query_async(&mut conn)
                .await;
            report_stuck_reservation(name, &released);
            return Err(anyhow::Error::new(e).context("Failed to store name in Redis").into());
        }

        debug!("Stored name {} in Redis", record.id);
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Name>> {
        Ok(self.list().await?.into_iter().find(|name: &Name| name.id == id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<Option<Name>> {
        let mut conn = self.get_connection().await?;

        let raw: Vec<String> = redis::cmd("LRANGE")
            .arg(NAMES_LIST_KEY)
            .arg(0)
            .arg(-1)
            .query_async(&mut conn)
            .await
            .context("Failed to read names from Redis")?;

        let Some((encoded, name)) = raw.iter().find_map(|entry: &String| {
            serde_json::from_str::<Name>(entry)
                .ok()
                .filter(|name: &Name| name.id == id)
                .map(|name: Name| (entry, name))
        }) else {
            return Ok(None);
        };

        let removed: i64 = redis::cmd("LREM")
            .arg(NAMES_LIST_KEY)
            .arg(1)
            .arg(encoded)
            .query_async(&mut conn)
            .await
            .context("Failed to remove name from Redis")?;

        // Another writer removed it first
        if removed == 0 {
            return Ok(None);
        }

        let _: i64 = redis::cmd("SREM")
            .arg(NAMES_INDEX_KEY)
            .arg(&name.name)
            .query_async(&mut conn)
            .await
            .context("Failed to release name in Redis")?;

        Ok(Some(name))
    }
}

/// Logs a reservation the insert could not release; returns true when the
/// name stays blocked in the index
fn report_stuck_reservation(name: &str, released: &Result<i64, redis::RedisError>) -> bool {
    match released {
        Ok(_) => false,
        Err(e) => {
            error!(
                "Name '{}' is still reserved in {} after a failed insert: {}",
                name, NAMES_INDEX_KEY, e
            );
            true
        }
    }
}

/// Decodes list entries, skipping anything that is not a valid name
fn decode_entries(raw: &[String]) -> Vec<Name> {
    raw.iter()
        .filter_map(|entry: &String| match serde_json::from_str::<Name>(entry) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!("Skipping malformed Redis entry: {}", e);
                None
            }
        })
        .collect()
}
