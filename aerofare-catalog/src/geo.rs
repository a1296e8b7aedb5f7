use std::collections::HashMap;

use aerofare_core::pricing::HaulCategory;

use crate::airports::Airport;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two airports in kilometres (haversine).
/// Symmetric, and exactly zero for identical coordinates.
pub fn great_circle_km(from: &Airport, to: &Airport) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Pricing region plus distance bucket for one origin/destination pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteClass {
    pub region: String,
    pub category: HaulCategory,
}

/// Route classification rules: home market, haul thresholds and the
/// country-to-market-area table. Everything here is data, injected from app
/// configuration; the defaults match the storefront.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    pub home_country: String,
    pub short_haul_max_km: f64,
    pub medium_haul_max_km: f64,
    market_areas: HashMap<String, String>,
}

impl RoutePolicy {
    pub fn new(
        home_country: impl Into<String>,
        short_haul_max_km: f64,
        medium_haul_max_km: f64,
    ) -> Self {
        Self {
            home_country: home_country.into(),
            short_haul_max_km,
            medium_haul_max_km,
            market_areas: default_market_areas(),
        }
    }

    /// Replace the country-to-area table.
    pub fn with_market_areas(mut self, market_areas: HashMap<String, String>) -> Self {
        self.market_areas = market_areas;
        self
    }

    /// Bucket a distance: strictly below the short threshold is short haul,
    /// strictly below the medium threshold is medium haul, everything else is
    /// long haul.
    pub fn haul_category(&self, distance_km: f64) -> HaulCategory {
        if distance_km < self.short_haul_max_km {
            HaulCategory::ShortHaul
        } else if distance_km < self.medium_haul_max_km {
            HaulCategory::MediumHaul
        } else {
            HaulCategory::LongHaul
        }
    }

    /// Region label for a pair of airports. Both sides in the home market is
    /// the domestic market; one side at home maps the far side's country
    /// through the market-area table to a named corridor, direction
    /// insensitive; everything else lands in the generic international
    /// bucket.
    pub fn region(&self, from: &Airport, to: &Airport) -> String {
        let from_home = from.country == self.home_country;
        let to_home = to.country == self.home_country;

        if from_home && to_home {
            return "Domestic".to_string();
        }

        let abroad = if from_home {
            to
        } else if to_home {
            from
        } else {
            return "International".to_string();
        };

        match self.market_areas.get(&abroad.country) {
            Some(area) => format!("{} to {}", self.home_country, area),
            None => "International".to_string(),
        }
    }

    pub fn classify(&self, from: &Airport, to: &Airport, distance_km: f64) -> RouteClass {
        RouteClass {
            region: self.region(from, to),
            category: self.haul_category(distance_km),
        }
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new("United States", 1500.0, 4000.0)
    }
}

fn default_market_areas() -> HashMap<String, String> {
    let table = [
        ("United Kingdom", "Europe"),
        ("Ireland", "Europe"),
        ("France", "Europe"),
        ("Germany", "Europe"),
        ("Netherlands", "Europe"),
        ("Switzerland", "Europe"),
        ("Austria", "Europe"),
        ("Spain", "Europe"),
        ("Portugal", "Europe"),
        ("Italy", "Europe"),
        ("Greece", "Europe"),
        ("Turkey", "Europe"),
        ("Japan", "Asia"),
        ("South Korea", "Asia"),
        ("China", "Asia"),
        ("Hong Kong", "Asia"),
        ("Taiwan", "Asia"),
        ("Singapore", "Asia"),
        ("Thailand", "Asia"),
        ("Vietnam", "Asia"),
        ("Malaysia", "Asia"),
        ("Indonesia", "Asia"),
        ("Philippines", "Asia"),
        ("India", "Asia"),
        ("United Arab Emirates", "Middle East"),
        ("Qatar", "Middle East"),
        ("Saudi Arabia", "Middle East"),
        ("Israel", "Middle East"),
        ("Bahrain", "Middle East"),
        ("Kuwait", "Middle East"),
        ("Oman", "Middle East"),
        ("Brazil", "South America"),
        ("Argentina", "South America"),
        ("Chile", "South America"),
        ("Colombia", "South America"),
        ("Peru", "South America"),
    ];
    table
        .iter()
        .map(|(country, area)| (country.to_string(), area.to_string()))
        .collect()
}
