use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use aerofare_catalog::airports::Airport;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/airports/{code}", get(get_airport))
}

/// GET /v1/airports/{code}
/// Reference lookup for the storefront's route pages
async fn get_airport(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Airport>, AppError> {
    let airport = state
        .airports
        .resolve(&code)
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;
    Ok(Json(airport.clone()))
}
