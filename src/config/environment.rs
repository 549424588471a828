// Start of file: /src/config/environment.rs

// * Environment configuration with a singleton pattern.
// * Values come from the process environment merged with a .env file.

use std::{borrow::Cow, collections::HashMap, fmt, path::Path, str::FromStr};
// * anyhow for convenient error handling
use anyhow::{bail, Context, Result};
// * once_cell for lazy static initialization
use once_cell::sync::Lazy;
use tracing::warn;

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_DB_NAME: &str = "names";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_PORT: u16 = 7777;
const DEFAULT_MAX_BODY_SIZE: usize = 1_048_576; // 1MB
const DEFAULT_TIMEOUT: u64 = 5; // 5 seconds
const DEFAULT_DB_PORT: u16 = 5432; // Default Postgres port

// * Where the names are kept
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
    Redis,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Postgres => "postgres",
            StorageBackend::Redis => "redis",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "redis" => Ok(StorageBackend::Redis),
            other => bail!("Unknown STORAGE_BACKEND '{other}' (expected memory, postgres or redis)"),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// * A struct containing all environment variables used by the app
#[derive(Clone, Debug)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub max_request_body_size: usize,
    pub default_timeout_seconds: u64,
    pub storage_backend: StorageBackend,
    pub db_host: Cow<'static, str>,
    pub db_port: u16,
    pub db_user: Cow<'static, str>,
    pub db_password: Cow<'static, str>,
    pub db_name: Cow<'static, str>,
    pub redis_url: Cow<'static, str>,
    // ? When set the binary builds the app but never listens
    pub test_environment: bool,
}

impl EnvironmentVariables {
    // * Loads environment variables.
    // * Only reads .env if ENVIRONMENT != "production".
    fn load() -> Result<Self> {
        let process: HashMap<String, String> = std::env::vars().collect();
        let vars: HashMap<String, String> = merge_dotenv(process, || read_dotenv(None));

        Self::from_map(&vars)
    }

    // * Builds the configuration from an explicit key/value map, providing defaults if missing
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        // * A small helper closure to fetch a non-empty variable by key
        let get_var = |key: &str| {
            vars.get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
        };

        Ok(Self {
            environment: get_var("ENVIRONMENT")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                    Cow::Borrowed(DEFAULT_ENVIRONMENT)
                }),

            host: get_var("HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_HOST)),

            port: get_var("PORT")
                .map(|s| s.parse().context("Invalid PORT value"))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),

            max_request_body_size: get_var("MAX_REQUEST_BODY_SIZE")
                .map(|s| s.parse().context("Invalid MAX_REQUEST_BODY_SIZE"))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),

            default_timeout_seconds: get_var("DEFAULT_TIMEOUT_SECONDS")
                .map(|s| s.parse().context("Invalid DEFAULT_TIMEOUT_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT),

            storage_backend: get_var("STORAGE_BACKEND")
                .map(|s| s.parse::<StorageBackend>())
                .transpose()?
                .unwrap_or_default(),

            db_host: get_var("DB_HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_DB_HOST)),

            db_port: get_var("DB_PORT")
                .map(|s| s.parse().context("Invalid DB_PORT"))
                .transpose()?
                .unwrap_or(DEFAULT_DB_PORT),

            db_user: get_var("DB_USER")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_DB_USER)),

            db_password: get_var("DB_PASSWORD")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_DB_PASSWORD)),

            db_name: get_var("DB_NAME")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_DB_NAME)),

            redis_url: get_var("REDIS_URL")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_REDIS_URL)),

            test_environment: get_var("TEST_ENVIRONMENT").is_some(),
        })
    }

    // * Address the listener binds to when no socket is inherited
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    // * Returns a reference to the lazily-initialized environment configuration
    pub fn instance() -> Result<&'static Self> {
        static INSTANCE: Lazy<Result<EnvironmentVariables, String>> = Lazy::new(|| {
            let config: EnvironmentVariables = EnvironmentVariables::load()
                .map_err(|e| format!("{e:#}"))?;

            if cfg!(debug_assertions) {
                tracing::debug!("Loaded environment configuration: {:#?}", config);
            }

            Ok(config)
        });

        // ! Loading happens once; a failure is reported on every call
        INSTANCE
            .as_ref()
            .map_err(|e| anyhow::anyhow!("Failed to load environment configuration: {e}"))
    }
}

// * Adds .env entries to the process variables; the process always wins.
// * In production the .env source is never read.
fn merge_dotenv<I>(mut vars: HashMap<String, String>, dotenv: impl FnOnce() -> I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let is_production: bool = vars
        .get("ENVIRONMENT")
        .is_some_and(|value: &String| value.trim() == "production");

    if is_production {
        return vars;
    }

    for (key, value) in dotenv() {
        vars.entry(key).or_insert(value);
    }

    vars
}

// * Parses a .env file without touching the process environment.
// * `None` searches the current directory and its parents.
fn read_dotenv(path: Option<&Path>) -> Vec<(String, String)> {
    let iter = match path {
        Some(path) => dotenv::from_path_iter(path),
        None => dotenv::dotenv_iter(),
    };

    match iter {
        Ok(entries) => entries
            .filter_map(|entry| match entry {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!("Skipping invalid .env line: {}", e);
                    None
                }
            })
            .collect(),
        Err(_) => Vec::new(),
    }
}

// End of file: /src/config/environment.rs
