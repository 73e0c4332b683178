pub mod memory;
pub mod postgres;
pub mod redis;
pub mod repository;

pub use memory::MemoryRepository;
pub use postgres::{create_pool, run_migrations, PgRepository};
pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
pub use repository::Repository;
