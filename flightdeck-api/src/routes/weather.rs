//! Weather data routes

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::db::DbClient;
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct WeatherState {
    pub db: DbClient,
}

/// GET /api/weather - Weather at all airports, ordered by airport code
#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "Weather",
    responses(
        (status = 200, description = "Weather at all airports", body = [flightdeck_core::WeatherReport]),
        (status = 500, description = "Database failure", body = ApiError),
    ),
)]
pub async fn list_weather(State(state): State<Arc<WeatherState>>) -> ApiResult<impl IntoResponse> {
    let reports = state.db.weather_list().await?;
    Ok(Json(reports))
}

/// Create the weather router.
pub fn create_router(db: DbClient) -> Router {
    let state = Arc::new(WeatherState { db });

    Router::new()
        .route("/weather", get(list_weather))
        .with_state(state)
}
