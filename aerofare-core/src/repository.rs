use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::pricing::PricingConfiguration;

pub type SourceResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Where a pricing document was read from or written to. Variants are listed
/// in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Postgres,
    Redis,
    Env,
    Cache,
    Default,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Postgres => "postgres",
            SourceKind::Redis => "redis",
            SourceKind::Env => "env",
            SourceKind::Cache => "cache",
            SourceKind::Default => "default",
        }
    }

    /// Tiers that survive a process restart.
    pub fn is_durable(&self) -> bool {
        matches!(self, SourceKind::Postgres | SourceKind::Redis)
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tier in the pricing-configuration fallback chain. Implementations live
/// in the store crate; the resolver walks them strictly in order.
#[async_trait]
pub trait PricingConfigSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Whether `save` may be attempted against this tier.
    fn supports_save(&self) -> bool {
        true
    }

    /// `Ok(None)` means the tier is reachable but holds no document.
    async fn load(&self) -> SourceResult<Option<PricingConfiguration>>;

    async fn save(&self, config: &PricingConfiguration) -> SourceResult<()>;
}
