use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Pricing Document Models
// ============================================================================

/// Distance bucket for a route, keyed by great-circle kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HaulCategory {
    ShortHaul,
    MediumHaul,
    LongHaul,
}

impl HaulCategory {
    pub const ALL: [HaulCategory; 3] = [
        HaulCategory::ShortHaul,
        HaulCategory::MediumHaul,
        HaulCategory::LongHaul,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HaulCategory::ShortHaul => "shortHaul",
            HaulCategory::MediumHaul => "mediumHaul",
            HaulCategory::LongHaul => "longHaul",
        }
    }
}

impl std::fmt::Display for HaulCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single min/max price band with its fluctuation margin.
///
/// `fluctuation_percent` is a percentage of `min_price`; the composed fare
/// may leave `[min_price, max_price]` by up to that amount in either
/// direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePrice {
    pub route: String,
    pub min_price: f64,
    pub max_price: f64,
    pub fluctuation_percent: f64,
}

impl RoutePrice {
    /// Band used when neither the resolved region nor the generic
    /// international bucket carries a price for the category.
    pub fn fallback() -> Self {
        RoutePrice {
            route: "International fallback".to_string(),
            min_price: 2400.0,
            max_price: 4800.0,
            fluctuation_percent: 10.0,
        }
    }
}

/// Price bands for one region label, split by haul category. A category may
/// hold any number of bands; lookups take the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPricing {
    pub region: String,
    #[serde(default)]
    pub short_haul: Vec<RoutePrice>,
    #[serde(default)]
    pub medium_haul: Vec<RoutePrice>,
    #[serde(default)]
    pub long_haul: Vec<RoutePrice>,
}

impl RegionPricing {
    pub fn bands(&self, category: HaulCategory) -> &[RoutePrice] {
        match category {
            HaulCategory::ShortHaul => &self.short_haul,
            HaulCategory::MediumHaul => &self.medium_haul,
            HaulCategory::LongHaul => &self.long_haul,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceClass {
    pub name: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripType {
    pub name: String,
    pub multiplier: f64,
}

/// The whole admin-editable pricing document. Always loaded and stored as a
/// unit; the three arrays are required on the wire, `lastUpdated` is stamped
/// when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfiguration {
    pub region_pricing: Vec<RegionPricing>,
    pub service_classes: Vec<ServiceClass>,
    pub trip_types: Vec<TripType>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid price band in {region}/{category}: {reason}")]
    InvalidBand {
        region: String,
        category: HaulCategory,
        reason: &'static str,
    },
    #[error("{kind} '{name}' must have a positive finite multiplier")]
    InvalidMultiplier { kind: &'static str, name: String },
    #[error("pricing document malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Lookup & Validation
// ============================================================================

impl PricingConfiguration {
    /// Region label that prices any corridor without a row of its own.
    pub const INTERNATIONAL_REGION: &'static str = "International";

    /// First band registered for the region and category. Bands are
    /// position-ordered: when several cover the same category the first one
    /// wins.
    pub fn band(&self, region: &str, category: HaulCategory) -> Option<&RoutePrice> {
        self.region_pricing
            .iter()
            .find(|r| r.region == region)
            .and_then(|r| r.bands(category).first())
    }

    /// Band lookup that never comes back empty: exact region, then the
    /// generic international bucket, then the hardcoded fallback band.
    pub fn band_or_fallback(&self, region: &str, category: HaulCategory) -> RoutePrice {
        self.band(region, category)
            .or_else(|| self.band(Self::INTERNATIONAL_REGION, category))
            .cloned()
            .unwrap_or_else(RoutePrice::fallback)
    }

    /// Multiplier for a requested cabin, tolerating the storefront's legacy
    /// labels ("Business class", "First class"). Unknown cabins price at 1.0.
    pub fn class_multiplier(&self, requested: &str) -> f64 {
        let canonical = canonical_class(requested);
        self.service_classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(canonical))
            .map(|c| c.multiplier)
            .unwrap_or(1.0)
    }

    /// Trip-type multiplier by name, 1.0 when the name is not configured.
    pub fn trip_multiplier(&self, requested: &str) -> f64 {
        let trimmed = requested.trim();
        self.trip_types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(trimmed))
            .map(|t| t.multiplier)
            .unwrap_or(1.0)
    }

    pub fn export_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn import_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Semantic checks applied to admin writes. Reads stay lenient: a stored
    /// document only has to deserialize to be served.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for region in &self.region_pricing {
            for category in HaulCategory::ALL {
                for band in region.bands(category) {
                    let invalid = |reason| ConfigError::InvalidBand {
                        region: region.region.clone(),
                        category,
                        reason,
                    };
                    if !band.min_price.is_finite()
                        || !band.max_price.is_finite()
                        || band.min_price < 0.0
                    {
                        return Err(invalid("prices must be finite and non-negative"));
                    }
                    if band.min_price > band.max_price {
                        return Err(invalid("minPrice exceeds maxPrice"));
                    }
                    if !band.fluctuation_percent.is_finite() || band.fluctuation_percent < 0.0 {
                        return Err(invalid("fluctuationPercent must be non-negative"));
                    }
                }
            }
        }
        for class in &self.service_classes {
            if !class.multiplier.is_finite() || class.multiplier <= 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    kind: "service class",
                    name: class.name.clone(),
                });
            }
        }
        for trip in &self.trip_types {
            if !trip.multiplier.is_finite() || trip.multiplier <= 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    kind: "trip type",
                    name: trip.name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn canonical_class(requested: &str) -> &str {
    let trimmed = requested.trim();
    if trimmed.eq_ignore_ascii_case("business class") {
        "Business"
    } else if trimmed.eq_ignore_ascii_case("first class") {
        "First"
    } else {
        trimmed
    }
}

// ============================================================================
// Default Pricing Table
// ============================================================================

fn band(route: &str, min_price: f64, max_price: f64, fluctuation_percent: f64) -> RoutePrice {
    RoutePrice {
        route: route.to_string(),
        min_price,
        max_price,
        fluctuation_percent,
    }
}

impl Default for PricingConfiguration {
    fn default() -> Self {
        PricingConfiguration {
            region_pricing: vec![
                RegionPricing {
                    region: "Domestic".to_string(),
                    short_haul: vec![band("Domestic short haul", 600.0, 1100.0, 10.0)],
                    medium_haul: vec![band("Domestic medium haul", 1400.0, 1600.0, 15.0)],
                    long_haul: vec![band("Domestic long haul", 1700.0, 2400.0, 12.0)],
                },
                RegionPricing {
                    region: "United States to Europe".to_string(),
                    short_haul: Vec::new(),
                    medium_haul: Vec::new(),
                    long_haul: vec![band("Transatlantic long haul", 2800.0, 4600.0, 12.0)],
                },
                RegionPricing {
                    region: "United States to Asia".to_string(),
                    short_haul: Vec::new(),
                    medium_haul: Vec::new(),
                    long_haul: vec![band("Transpacific long haul", 3400.0, 5800.0, 14.0)],
                },
                RegionPricing {
                    region: "United States to Middle East".to_string(),
                    short_haul: Vec::new(),
                    medium_haul: Vec::new(),
                    long_haul: vec![band("Middle East long haul", 3200.0, 5200.0, 12.0)],
                },
                RegionPricing {
                    region: "United States to South America".to_string(),
                    short_haul: Vec::new(),
                    medium_haul: vec![band("Latin America medium haul", 1900.0, 2600.0, 10.0)],
                    long_haul: vec![band("South America long haul", 2400.0, 3800.0, 12.0)],
                },
                RegionPricing {
                    region: PricingConfiguration::INTERNATIONAL_REGION.to_string(),
                    short_haul: vec![band("International short haul", 900.0, 1500.0, 10.0)],
                    medium_haul: vec![band("International medium haul", 1600.0, 2400.0, 10.0)],
                    long_haul: vec![band("International long haul", 2400.0, 4800.0, 10.0)],
                },
            ],
            service_classes: vec![
                ServiceClass {
                    name: "Economy".to_string(),
                    multiplier: 1.0,
                },
                ServiceClass {
                    name: "Premium Economy".to_string(),
                    multiplier: 1.6,
                },
                ServiceClass {
                    name: "Business".to_string(),
                    multiplier: 2.1,
                },
                ServiceClass {
                    name: "First".to_string(),
                    multiplier: 3.2,
                },
            ],
            trip_types: vec![
                TripType {
                    name: "One-way".to_string(),
                    multiplier: 0.5,
                },
                TripType {
                    name: "Round Trip".to_string(),
                    multiplier: 1.0,
                },
                TripType {
                    name: "Multi-city".to_string(),
                    multiplier: 1.5,
                },
            ],
            last_updated: Utc::now(),
        }
    }
}
