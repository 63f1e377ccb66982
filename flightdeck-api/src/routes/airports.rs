//! Airport data routes

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::db::DbClient;
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AirportsState {
    pub db: DbClient,
}

/// GET /api/airports - List all airports ordered by code
#[utoipa::path(
    get,
    path = "/api/airports",
    tag = "Airports",
    responses(
        (status = 200, description = "All airports", body = [flightdeck_core::Airport]),
        (status = 500, description = "Database failure", body = ApiError),
    ),
)]
pub async fn list_airports(
    State(state): State<Arc<AirportsState>>,
) -> ApiResult<impl IntoResponse> {
    let airports = state.db.airports_list().await?;
    Ok(Json(airports))
}

/// Create the airports router.
pub fn create_router(db: DbClient) -> Router {
    let state = Arc::new(AirportsState { db });

    Router::new()
        .route("/airports", get(list_airports))
        .with_state(state)
}
