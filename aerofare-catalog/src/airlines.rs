use serde::{Deserialize, Serialize};

pub const DEFAULT_PREMIUM_SURCHARGE: f64 = 1.2;

/// One carrier in the storefront's rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    pub name: String,
    pub logo: String,
    pub premium: bool,
}

/// Carrier rotation used to fan out quote candidates, plus the flat
/// surcharge applied once to premium carriers.
#[derive(Debug, Clone)]
pub struct AirlineCatalog {
    pub airlines: Vec<Airline>,
    pub premium_surcharge: f64,
}

impl AirlineCatalog {
    pub fn new(airlines: Vec<Airline>, premium_surcharge: f64) -> Self {
        Self {
            airlines,
            premium_surcharge,
        }
    }

    /// Default rotation with the premium flags rewritten from the given
    /// carrier list (case-insensitive on names).
    pub fn with_premium_carriers(premium_carriers: &[String], premium_surcharge: f64) -> Self {
        let mut catalog = Self::default();
        catalog.premium_surcharge = premium_surcharge;
        for airline in &mut catalog.airlines {
            airline.premium = premium_carriers
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&airline.name));
        }
        catalog
    }
}

fn carrier(name: &str, logo: &str, premium: bool) -> Airline {
    Airline {
        name: name.to_string(),
        logo: logo.to_string(),
        premium,
    }
}

impl Default for AirlineCatalog {
    fn default() -> Self {
        Self {
            airlines: vec![
                carrier("American Airlines", "/logos/american-airlines.svg", true),
                carrier("Delta Air Lines", "/logos/delta-air-lines.svg", true),
                carrier("United Airlines", "/logos/united-airlines.svg", true),
                carrier("Alaska Airlines", "/logos/alaska-airlines.svg", false),
                carrier("JetBlue Airways", "/logos/jetblue-airways.svg", false),
                carrier("British Airways", "/logos/british-airways.svg", false),
                carrier("Lufthansa", "/logos/lufthansa.svg", false),
                carrier("Air France", "/logos/air-france.svg", false),
                carrier("Emirates", "/logos/emirates.svg", false),
                carrier("Qatar Airways", "/logos/qatar-airways.svg", false),
            ],
            premium_surcharge: DEFAULT_PREMIUM_SURCHARGE,
        }
    }
}
