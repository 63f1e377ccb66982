//! Flight data routes
//!
//! Thin passthrough endpoints over the flights table, consumed by the
//! browser tables. No model involvement.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::db::DbClient;
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct FlightsState {
    pub db: DbClient,
}

/// GET /api/flights - List all flights ordered by departure time
#[utoipa::path(
    get,
    path = "/api/flights",
    tag = "Flights",
    responses(
        (status = 200, description = "All flights", body = [flightdeck_core::FlightWithRoute]),
        (status = 500, description = "Database failure", body = ApiError),
    ),
)]
pub async fn list_flights(State(state): State<Arc<FlightsState>>) -> ApiResult<impl IntoResponse> {
    let flights = state.db.flights_list(None, None).await?;
    Ok(Json(flights))
}

/// GET /api/flights/{code} - Get one flight by code
#[utoipa::path(
    get,
    path = "/api/flights/{code}",
    tag = "Flights",
    params(
        ("code" = String, Path, description = "Flight code (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Flight details", body = flightdeck_core::FlightWithRoute),
        (status = 404, description = "Flight not found", body = ApiError),
    ),
)]
pub async fn get_flight(
    State(state): State<Arc<FlightsState>>,
    Path(code): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let flight = state
        .db
        .flight_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::flight_not_found(&code.to_uppercase()))?;

    Ok(Json(flight))
}

/// Create the flights router.
pub fn create_router(db: DbClient) -> Router {
    let state = Arc::new(FlightsState { db });

    Router::new()
        .route("/flights", get(list_flights))
        .route("/flights/:code", get(get_flight))
        .with_state(state)
}
