pub mod app_config;
pub mod database;
pub mod redis_repo;
pub mod resolver;
pub mod sources;

pub use database::DbClient;
pub use redis_repo::RedisClient;
pub use resolver::ConfigResolver;
