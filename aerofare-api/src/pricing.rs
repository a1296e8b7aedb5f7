use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use aerofare_core::pricing::PricingConfiguration;
use aerofare_store::resolver::SaveOutcome;

use crate::{error::AppError, state::AppState};

/// Names the configuration tier a response was served from.
pub const SOURCE_HEADER: &str = "x-pricing-source";
/// Signals whether a write landed on a tier that survives restarts.
pub const DURABLE_HEADER: &str = "x-pricing-durable";

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v1/admin/pricing",
        get(get_pricing).post(update_pricing).delete(reset_pricing),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/admin/pricing
/// Serve the active pricing document and name the tier it came from
async fn get_pricing(State(state): State<AppState>) -> (HeaderMap, Json<PricingConfiguration>) {
    let outcome = state.resolver.load().await;

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(SOURCE_HEADER),
        HeaderValue::from_static(outcome.source.as_str()),
    );
    (headers, Json(outcome.config))
}

/// POST /v1/admin/pricing
/// Replace the active pricing document
async fn update_pricing(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(HeaderMap, Json<PricingConfiguration>), AppError> {
    // 1. Structural check: the document must carry all three tables.
    let config: PricingConfiguration = serde_json::from_value(body)
        .map_err(|e| AppError::ValidationError(format!("invalid pricing document: {}", e)))?;

    // 2. Semantic check: bands and multipliers must be coherent.
    config
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    // 3. Persist on the most durable tier currently available.
    let outcome = state.resolver.save(config).await;
    Ok(save_response(outcome))
}

/// DELETE /v1/admin/pricing
/// Reset the active pricing document to the built-in table
async fn reset_pricing(State(state): State<AppState>) -> (HeaderMap, Json<PricingConfiguration>) {
    let outcome = state.resolver.save(PricingConfiguration::default()).await;
    save_response(outcome)
}

fn save_response(outcome: SaveOutcome) -> (HeaderMap, Json<PricingConfiguration>) {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(SOURCE_HEADER),
        HeaderValue::from_static(outcome.source.as_str()),
    );
    headers.insert(
        HeaderName::from_static(DURABLE_HEADER),
        HeaderValue::from_static(if outcome.durable { "true" } else { "false" }),
    );
    (headers, Json(outcome.config))
}
