use aerofare_catalog::airlines::AirlineCatalog;
use aerofare_core::pricing::{HaulCategory, PricingConfiguration, RoutePrice};
use uuid::Uuid;

use crate::composer::FareComposer;
use crate::models::GeneratedFlight;
use crate::random::RandomSource;

/// Inputs for one batch of quote candidates.
#[derive(Debug, Clone)]
pub struct OfferRequest {
    pub from_code: String,
    pub to_code: String,
    pub service_class: String,
    pub trip_type: String,
    pub category: HaulCategory,
    pub passengers: u32,
    pub max_offers: usize,
}

/// Fans a quote out across the carrier rotation, prices each candidate and
/// keeps the cheapest ones.
pub struct FlightOfferAssembler {
    airlines: AirlineCatalog,
    composer: FareComposer,
}

impl FlightOfferAssembler {
    pub fn new(airlines: AirlineCatalog) -> Self {
        let composer = FareComposer::new(airlines.premium_surcharge);
        Self { airlines, composer }
    }

    /// One candidate per carrier, sorted ascending by display price and
    /// truncated to `max_offers`. Durations and stop counts are display
    /// dressing drawn from the same random source, not schedule data.
    pub fn generate(
        &self,
        config: &PricingConfiguration,
        band: &RoutePrice,
        request: &OfferRequest,
        rng: &mut dyn RandomSource,
    ) -> Vec<GeneratedFlight> {
        let mut flights: Vec<GeneratedFlight> = self
            .airlines
            .airlines
            .iter()
            .map(|airline| {
                let fare = self.composer.compose(
                    config,
                    band,
                    &request.service_class,
                    &request.trip_type,
                    airline.premium,
                    rng,
                );
                let duration = synth_duration(request.category, rng);
                let stops = synth_stops(request.category, rng);
                let total_price = if request.passengers > 1 {
                    Some(fare.total_for(request.passengers))
                } else {
                    None
                };

                GeneratedFlight {
                    id: Uuid::new_v4(),
                    airline: airline.name.clone(),
                    logo: airline.logo.clone(),
                    duration,
                    stops,
                    from_code: request.from_code.clone(),
                    to_code: request.to_code.clone(),
                    price: fare.rounded(),
                    total_price,
                }
            })
            .collect();

        flights.sort_by_key(|f| f.price);
        flights.truncate(request.max_offers);
        flights
    }
}

fn synth_duration(category: HaulCategory, rng: &mut dyn RandomSource) -> String {
    let (lo, hi) = match category {
        HaulCategory::ShortHaul => (1u32, 3u32),
        HaulCategory::MediumHaul => (3, 6),
        HaulCategory::LongHaul => (7, 15),
    };
    let hours = lo + (rng.unit() * (hi - lo + 1) as f64) as u32;
    let minutes = (rng.unit() * 12.0) as u32 * 5;
    format!("{hours}h {minutes:02}m")
}

fn synth_stops(category: HaulCategory, rng: &mut dyn RandomSource) -> u8 {
    let draw = rng.unit();
    match category {
        HaulCategory::ShortHaul => {
            if draw < 0.7 {
                0
            } else {
                1
            }
        }
        HaulCategory::MediumHaul => {
            if draw < 0.55 {
                0
            } else if draw < 0.95 {
                1
            } else {
                2
            }
        }
        HaulCategory::LongHaul => {
            if draw < 0.4 {
                0
            } else if draw < 0.85 {
                1
            } else {
                2
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    fn test_request(passengers: u32, max_offers: usize) -> OfferRequest {
        OfferRequest {
            from_code: "JFK".to_string(),
            to_code: "LAX".to_string(),
            service_class: "Business".to_string(),
            trip_type: "Round Trip".to_string(),
            category: HaulCategory::MediumHaul,
            passengers,
            max_offers,
        }
    }

    fn test_band() -> RoutePrice {
        RoutePrice {
            route: "Domestic medium haul".to_string(),
            min_price: 1400.0,
            max_price: 1600.0,
            fluctuation_percent: 15.0,
        }
    }

    #[test]
    fn offers_come_back_sorted_and_truncated() {
        let assembler = FlightOfferAssembler::new(AirlineCatalog::default());
        let config = PricingConfiguration::default();
        let mut rng = SeededRandom::new(3);

        let flights = assembler.generate(&config, &test_band(), &test_request(1, 6), &mut rng);

        assert_eq!(flights.len(), 6);
        for pair in flights.windows(2) {
            assert!(pair[0].price <= pair[1].price);
        }
        for flight in &flights {
            assert_eq!(flight.from_code, "JFK");
            assert_eq!(flight.to_code, "LAX");
            assert!(flight.total_price.is_none());
        }
    }

    #[test]
    fn multi_passenger_totals_round_once() {
        let assembler = FlightOfferAssembler::new(AirlineCatalog::default());
        let config = PricingConfiguration::default();
        let mut rng = SeededRandom::new(9);

        let flights = assembler.generate(&config, &test_band(), &test_request(3, 10), &mut rng);

        for flight in &flights {
            let total = flight.total_price.expect("multi-passenger total");
            // Totals come from the unrounded amount, so they may differ from
            // three rounded singles by at most the rounding slack.
            assert!((total - flight.price * 3).abs() <= 2);
        }
    }

    #[test]
    fn display_dressing_tracks_the_haul_category() {
        let assembler = FlightOfferAssembler::new(AirlineCatalog::default());
        let config = PricingConfiguration::default();
        let mut rng = SeededRandom::new(27);

        let mut request = test_request(1, 10);
        request.category = HaulCategory::LongHaul;

        let flights = assembler.generate(&config, &test_band(), &request, &mut rng);
        assert_eq!(flights.len(), 10);
        for flight in &flights {
            let (hours, rest) = flight.duration.split_once("h ").expect("duration shape");
            let hours: u32 = hours.parse().unwrap();
            assert!((7..=15).contains(&hours), "hours {hours}");
            let minutes: u32 = rest.strip_suffix('m').unwrap().parse().unwrap();
            assert!(minutes < 60);
            assert_eq!(minutes % 5, 0);
            assert!(flight.stops <= 2);
        }
    }

    #[test]
    fn same_seed_prices_identically() {
        let assembler = FlightOfferAssembler::new(AirlineCatalog::default());
        let config = PricingConfiguration::default();

        let mut first_rng = SeededRandom::new(99);
        let first = assembler.generate(&config, &test_band(), &test_request(1, 10), &mut first_rng);
        let mut second_rng = SeededRandom::new(99);
        let second =
            assembler.generate(&config, &test_band(), &test_request(1, 10), &mut second_rng);

        let first_prices: Vec<i64> = first.iter().map(|f| f.price).collect();
        let second_prices: Vec<i64> = second.iter().map(|f| f.price).collect();
        assert_eq!(first_prices, second_prices);
    }
}
