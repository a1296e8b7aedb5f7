use std::sync::Arc;

use aerofare_catalog::airports::AirportCatalog;
use aerofare_catalog::geo::RoutePolicy;
use aerofare_offer::generator::FlightOfferAssembler;
use aerofare_store::{ConfigResolver, RedisClient};

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ConfigResolver>,
    pub airports: Arc<AirportCatalog>,
    pub route_policy: Arc<RoutePolicy>,
    pub assembler: Arc<FlightOfferAssembler>,
    pub redis: Option<Arc<RedisClient>>,
    pub max_offers: usize,
}
