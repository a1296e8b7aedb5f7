use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use aerofare_core::pricing::PricingConfiguration;
use aerofare_core::repository::{PricingConfigSource, SourceKind};

use crate::sources::{DefaultSource, MemorySource};

/// Result of a chain load: the served document and the tier it came from.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub config: PricingConfiguration,
    pub source: SourceKind,
}

/// Result of a chain save: the stored document, the tier that accepted it,
/// and whether that tier survives a restart.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub config: PricingConfiguration,
    pub source: SourceKind,
    pub durable: bool,
}

/// Walks the pricing-source chain in priority order. External tiers are
/// whatever the caller wires in (postgres, redis, env seed); the in-memory
/// cache and the compiled-in default are always appended, so the chain can
/// never come back empty.
pub struct ConfigResolver {
    tiers: Vec<Arc<dyn PricingConfigSource>>,
    cache: Arc<MemorySource>,
    source_timeout: Duration,
}

impl ConfigResolver {
    pub fn new(external: Vec<Arc<dyn PricingConfigSource>>, source_timeout: Duration) -> Self {
        let cache = Arc::new(MemorySource::new());
        let mut tiers = external;
        tiers.push(cache.clone() as Arc<dyn PricingConfigSource>);
        tiers.push(Arc::new(DefaultSource));
        Self {
            tiers,
            cache,
            source_timeout,
        }
    }

    /// Serve the first tier that yields a structurally valid document.
    /// Failures, timeouts and empty tiers are skipped; a hit on an external
    /// tier refreshes the cache so later outages degrade gracefully.
    pub async fn load(&self) -> LoadOutcome {
        for tier in &self.tiers {
            let kind = tier.kind();
            match tokio::time::timeout(self.source_timeout, tier.load()).await {
                Ok(Ok(Some(config))) => {
                    if kind != SourceKind::Cache && kind != SourceKind::Default {
                        self.cache.store(config.clone()).await;
                    }
                    info!(source = kind.as_str(), "pricing configuration loaded");
                    return LoadOutcome {
                        config,
                        source: kind,
                    };
                }
                Ok(Ok(None)) => {
                    debug!(source = kind.as_str(), "pricing source empty, trying next");
                }
                Ok(Err(error)) => {
                    warn!(source = kind.as_str(), %error, "pricing source failed, trying next");
                }
                Err(_) => {
                    warn!(source = kind.as_str(), "pricing source timed out, trying next");
                }
            }
        }

        // The default tier always answers, so this only runs if construction
        // ever changes. The chain still has to return something.
        LoadOutcome {
            config: PricingConfiguration::default(),
            source: SourceKind::Default,
        }
    }

    /// Stamp the document and write it to the highest-priority tier that
    /// accepts writes, then write through to the cache so reads see the new
    /// version immediately. A save that only reaches the cache reports
    /// `durable = false`.
    pub async fn save(&self, mut config: PricingConfiguration) -> SaveOutcome {
        config.last_updated = Utc::now();

        for tier in &self.tiers {
            if !tier.supports_save() {
                continue;
            }
            let kind = tier.kind();
            match tokio::time::timeout(self.source_timeout, tier.save(&config)).await {
                Ok(Ok(())) => {
                    if kind != SourceKind::Cache {
                        self.cache.store(config.clone()).await;
                    }
                    info!(
                        source = kind.as_str(),
                        durable = kind.is_durable(),
                        "pricing configuration saved"
                    );
                    return SaveOutcome {
                        config,
                        source: kind,
                        durable: kind.is_durable(),
                    };
                }
                Ok(Err(error)) => {
                    warn!(source = kind.as_str(), %error, "pricing save failed, trying next tier");
                }
                Err(_) => {
                    warn!(source = kind.as_str(), "pricing save timed out, trying next tier");
                }
            }
        }

        // The cache tier accepts every write, so the loop returns before
        // reaching this.
        self.cache.store(config.clone()).await;
        SaveOutcome {
            config,
            source: SourceKind::Cache,
            durable: false,
        }
    }
}
