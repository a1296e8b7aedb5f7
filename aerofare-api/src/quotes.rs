use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use aerofare_catalog::geo::{self, RouteClass};
use aerofare_core::pricing::HaulCategory;
use aerofare_offer::generator::OfferRequest;
use aerofare_offer::models::GeneratedFlight;
use aerofare_offer::random::ThreadRandom;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub from_code: String,
    pub to_code: String,
    pub service_class: String,
    pub trip_type: String,
    pub departure_date: NaiveDate,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
}

fn default_passengers() -> u32 {
    1
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub from_code: String,
    pub to_code: String,
    pub distance_km: f64,
    pub region: String,
    pub category: HaulCategory,
    pub departure_date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub route: RouteSummary,
    pub flights: Vec<GeneratedFlight>,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/quotes", post(create_quote))
}

/// POST /v1/quotes
/// Price a route across the carrier rotation and rank the offers
async fn create_quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    if req.passengers == 0 {
        return Err(AppError::ValidationError(
            "passengers must be at least 1".to_string(),
        ));
    }

    // 1. Resolve both endpoints; an unknown code is a hard failure.
    let origin = state
        .airports
        .resolve(&req.from_code)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    let destination = state
        .airports
        .resolve(&req.to_code)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    // 2. Classify the route by distance and market area.
    let distance_km = geo::great_circle_km(origin, destination);
    let RouteClass { region, category } =
        state.route_policy.classify(origin, destination, distance_km);

    // 3. Resolve the price band from the active configuration.
    let outcome = state.resolver.load().await;
    let band = outcome.config.band_or_fallback(&region, category);

    // 4. Fan out across the carrier rotation, price and rank.
    let offer_request = OfferRequest {
        from_code: origin.code.clone(),
        to_code: destination.code.clone(),
        service_class: req.service_class.clone(),
        trip_type: req.trip_type.clone(),
        category,
        passengers: req.passengers,
        max_offers: state.max_offers,
    };
    let mut rng = ThreadRandom;
    let flights = state
        .assembler
        .generate(&outcome.config, &band, &offer_request, &mut rng);

    Ok(Json(QuoteResponse {
        route: RouteSummary {
            from_code: origin.code.clone(),
            to_code: destination.code.clone(),
            distance_km: (distance_km * 10.0).round() / 10.0,
            region,
            category,
            departure_date: req.departure_date,
        },
        flights,
    }))
}
