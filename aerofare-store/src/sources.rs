use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use aerofare_core::pricing::PricingConfiguration;
use aerofare_core::repository::{PricingConfigSource, SourceKind, SourceResult};

use crate::database::DbClient;
use crate::redis_repo::RedisClient;

/// Durable tier: a single JSONB document in postgres.
pub struct PostgresSource {
    db: DbClient,
}

impl PostgresSource {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PricingConfigSource for PostgresSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Postgres
    }

    async fn load(&self) -> SourceResult<Option<PricingConfiguration>> {
        match self.db.fetch_pricing_document().await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, config: &PricingConfiguration) -> SourceResult<()> {
        let document = serde_json::to_value(config)?;
        self.db
            .upsert_pricing_document(&document, config.last_updated)
            .await?;
        Ok(())
    }
}

/// Durable tier: the document as a JSON snapshot string in redis.
pub struct RedisSource {
    redis: RedisClient,
}

impl RedisSource {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl PricingConfigSource for RedisSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Redis
    }

    async fn load(&self) -> SourceResult<Option<PricingConfiguration>> {
        match self.redis.get_pricing_snapshot().await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, config: &PricingConfiguration) -> SourceResult<()> {
        let document = serde_json::to_string(config)?;
        self.redis.set_pricing_snapshot(&document).await?;
        Ok(())
    }
}

/// Read-only seed: a JSON document in a process environment variable.
pub struct EnvSource {
    var_name: String,
}

impl EnvSource {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

#[async_trait]
impl PricingConfigSource for EnvSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Env
    }

    fn supports_save(&self) -> bool {
        false
    }

    async fn load(&self) -> SourceResult<Option<PricingConfiguration>> {
        match std::env::var(&self.var_name) {
            Ok(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    async fn save(&self, _config: &PricingConfiguration) -> SourceResult<()> {
        Err("environment seed is read-only".into())
    }
}

/// Process-local cache tier. Always writable, never durable.
#[derive(Default)]
pub struct MemorySource {
    cached: RwLock<Option<PricingConfiguration>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the cache from a higher tier without going through `save`.
    pub async fn store(&self, config: PricingConfiguration) {
        *self.cached.write().await = Some(config);
        debug!("pricing cache refreshed");
    }
}

#[async_trait]
impl PricingConfigSource for MemorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::Cache
    }

    async fn load(&self) -> SourceResult<Option<PricingConfiguration>> {
        Ok(self.cached.read().await.clone())
    }

    async fn save(&self, config: &PricingConfiguration) -> SourceResult<()> {
        self.store(config.clone()).await;
        Ok(())
    }
}

/// Terminal tier: the compiled-in default table. Cannot fail, cannot save.
pub struct DefaultSource;

#[async_trait]
impl PricingConfigSource for DefaultSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Default
    }

    fn supports_save(&self) -> bool {
        false
    }

    async fn load(&self) -> SourceResult<Option<PricingConfiguration>> {
        Ok(Some(PricingConfiguration::default()))
    }

    async fn save(&self, _config: &PricingConfiguration) -> SourceResult<()> {
        Err("default configuration is read-only".into())
    }
}
