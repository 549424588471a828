pub mod memory_store;
pub mod name_store;
pub mod postgres_service;
pub mod redis_manager;

pub use memory_store::MemoryStore;
pub use name_store::{NameStore, StoreError};
pub use postgres_service::PostgresStore;
pub use redis_manager::RedisStore;
