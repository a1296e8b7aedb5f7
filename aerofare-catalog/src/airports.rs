use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of the embedded IATA reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Airport lookup over the embedded dataset. Codes are indexed uppercase;
/// a code that is not in the dataset is a hard error, never a guess.
pub struct AirportCatalog {
    airports: HashMap<String, Airport>,
}

static AIRPORTS_JSON: &str = include_str!("../data/airports.json");

impl AirportCatalog {
    /// Parse the dataset shipped with the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(AIRPORTS_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let rows: Vec<Airport> = serde_json::from_str(raw)?;
        let mut airports = HashMap::with_capacity(rows.len());
        for airport in rows {
            let code = airport.code.to_ascii_uppercase();
            let normalized = Airport {
                code: code.clone(),
                ..airport
            };
            if airports.insert(code.clone(), normalized).is_some() {
                return Err(CatalogError::DuplicateCode(code));
            }
        }
        Ok(Self { airports })
    }

    /// Case-insensitive lookup by IATA code.
    pub fn resolve(&self, code: &str) -> Result<&Airport, CatalogError> {
        let key = code.trim().to_ascii_uppercase();
        self.airports.get(&key).ok_or(CatalogError::UnknownAirport(key))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown airport code: {0}")]
    UnknownAirport(String),

    #[error("duplicate airport code in dataset: {0}")]
    DuplicateCode(String),

    #[error("airport dataset malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
