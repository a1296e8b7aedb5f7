use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub route_policy: RoutePolicySettings,
    #[serde(default)]
    pub airlines: AirlineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PricingSettings {
    /// Environment variable read by the env seed tier.
    pub env_var: String,
    pub source_timeout_ms: u64,
    pub max_offers: usize,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            env_var: "AEROFARE_PRICING_JSON".to_string(),
            source_timeout_ms: 1500,
            max_offers: 6,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RoutePolicySettings {
    pub home_country: String,
    pub short_haul_max_km: f64,
    pub medium_haul_max_km: f64,
}

impl Default for RoutePolicySettings {
    fn default() -> Self {
        Self {
            home_country: "United States".to_string(),
            short_haul_max_km: 1500.0,
            medium_haul_max_km: 4000.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AirlineSettings {
    pub premium_surcharge: f64,
    pub premium_carriers: Vec<String>,
}

impl Default for AirlineSettings {
    fn default() -> Self {
        Self {
            premium_surcharge: 1.2,
            premium_carriers: vec![
                "American Airlines".to_string(),
                "Delta Air Lines".to_string(),
                "United Airlines".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Layer the current environment's file on top; optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Env overrides, e.g. AEROFARE__SERVER__PORT=9090
            .add_source(config::Environment::with_prefix("AEROFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_sections_default_sensibly() {
        let raw = r#"{ "server": { "port": 8080 } }"#;
        let config: Config = serde_json::from_str(raw).unwrap();

        assert!(config.database.is_none());
        assert!(config.redis.is_none());
        assert_eq!(config.pricing.env_var, "AEROFARE_PRICING_JSON");
        assert_eq!(config.pricing.source_timeout_ms, 1500);
        assert_eq!(config.pricing.max_offers, 6);
        assert_eq!(config.route_policy.home_country, "United States");
        assert_eq!(config.route_policy.short_haul_max_km, 1500.0);
        assert_eq!(config.route_policy.medium_haul_max_km, 4000.0);
        assert_eq!(config.airlines.premium_carriers.len(), 3);
    }
}
