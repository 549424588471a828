// =============================================================================
// POSTGRES STORE - names table on a single connection pool
// =============================================================================

use std::sync::Arc;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{ConnectOptions, Executor, PgPool, Row};
use tokio::sync::OnceCell;
use tracing::{debug, info, log::LevelFilter};
use uuid::Uuid;

use crate::config::environment::EnvironmentVariables;
use crate::database::StoreError;
use crate::models::Name;

// =============================================================================
// SQL CONSTANTS
// =============================================================================

/// Single initialization SQL script
const INIT_SCHEMA_SQL: &str = include_str!("sql/schema_init.sql");

// =============================================================================
// POSTGRES STORE
// =============================================================================

/// Name storage backed by a PostgreSQL connection pool.
/// The pool is created lazily by `initialize()`.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: Arc<OnceCell<PgPool>>,
    config: Arc<EnvironmentVariables>,
}

impl PostgresStore {
    pub fn new(config: Arc<EnvironmentVariables>) -> Self {
        Self {
            pool: Arc::new(OnceCell::new()),
            config,
        }
    }

    /// Creates the pool and makes sure the names table exists.
    pub async fn initialize(&self) -> Result<()> {
        info!("Initializing PostgresStore...");

        self.pool.get_or_try_init(|| async {
            self.create_pool().await
        }).await?;

        let pool: &PgPool = self.get_pool()?;
        self.initialize_schema(pool).await?;

        info!("PostgresStore initialized successfully");
        Ok(())
    }

    pub async fn shutdown(&self) {
        info!("Initiating PostgresStore shutdown...");
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!("Database connection pool closed");
        } else {
            debug!("Database pool was not initialized, nothing to close");
        }
    }

    /// Errors if the pool has not been initialized.
    pub fn get_pool(&self) -> Result<&PgPool> {
        self.pool.get().ok_or_else(|| anyhow::anyhow!("Database pool not initialized"))
    }
}

// =============================================================================
// NAME QUERIES
// =============================================================================

impl PostgresStore {
    pub async fn list(&self) -> Result<Vec<Name>> {
        let rows: Vec<PgRow> = sqlx::query(
            "SELECT id, name, created_at FROM names ORDER BY created_at ASC, id ASC"
        )
        .fetch_all(self.get_pool()?)
        .await
        .context("Failed to list names")?;

        Ok(rows.iter().map(row_to_name).collect())
    }

    pub async fn insert(&self, name: &str) -> Result<Name, StoreError> {
        let record: Name = Name::new(name);

        // The unique constraint decides duplicates, so concurrent inserts stay consistent
        let inserted: Option<PgRow> = sqlx::query(
            r#"
            INSERT INTO names (id, name, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name, created_at
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(record.created_at)
        .fetch_optional(self.get_pool()?)
        .await
        .context("Failed to insert name")?;

        inserted
            .as_ref()
            .map(row_to_name)
            .ok_or_else(|| StoreError::Duplicate(name.to_string()))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Name>> {
        let row: Option<PgRow> = sqlx::query("SELECT id, name, created_at FROM names WHERE id = $1")
            .bind(id)
            .fetch_optional(self.get_pool()?)
            .await
            .context("Failed to fetch name")?;

        Ok(row.as_ref().map(row_to_name))
    }

    pub async fn remove(&self, id: Uuid) -> Result<Option<Name>> {
        let row: Option<PgRow> = sqlx::query(
            "DELETE FROM names WHERE id = $1 RETURNING id, name, created_at"
        )
        .bind(id)
        .fetch_optional(self.get_pool()?)
        .await
        .context("Failed to delete name")?;

        Ok(row.as_ref().map(row_to_name))
    }

    pub async fn ping(&self) -> Result<()> {
        let _: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(self.get_pool()?)
            .await
            .context("Database ping failed")?;
        Ok(())
    }
}

// =============================================================================
// INTERNAL HELPERS
// =============================================================================

fn row_to_name(row: &PgRow) -> Name {
    let created_at: DateTime<Utc> = row.get("created_at");

    Name {
        id: row.get("id"),
        name: row.get("name"),
        created_at,
    }
}

impl PostgresStore {
    async fn create_pool(&self) -> Result<PgPool> {
        let connect_options: PgConnectOptions = self.create_connect_options();

        let pool: PgPool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .idle_timeout(std::time::Duration::from_secs(30))
            .connect_with(connect_options)
            .await
            .context("Failed to create database connection pool")?;

        Ok(pool)
    }

    /// Connection options with SSL and UTC timezone
    fn create_connect_options(&self) -> PgConnectOptions {
        let mut options: PgConnectOptions = PgConnectOptions::new()
            .host(&self.config.db_host)
            .port(self.config.db_port)
            .username(&self.config.db_user)
            .password(&self.config.db_password)
            .database(&self.config.db_name)
            .log_statements(LevelFilter::Debug);

        options = options.options([
            ("timezone", "UTC"),
            ("application_name", "names-api")
        ]);

        let is_development: bool = self.config.environment == "development";
        if !is_development {
            options = options.ssl_mode(sqlx::postgres::PgSslMode::Require);
        } else {
            options = options.ssl_mode(sqlx::postgres::PgSslMode::Prefer);
        }

        options
    }

    async fn initialize_schema(&self, pool: &PgPool) -> Result<()> {
        info!("Executing schema initialization...");

        pool.execute(INIT_SCHEMA_SQL)
            .await
            .context("Failed to execute schema initialization SQL")?;

        info!("Schema initialization completed");
        Ok(())
    }
}
