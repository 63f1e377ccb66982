//! REST API Routes Module
//!
//! Route handlers organized by surface:
//! - Chat endpoint (the orchestrated exchange)
//! - Direct tool invocation (diagnostics/tests)
//! - Data passthrough endpoints (flights, airports, weather)
//! - Health check endpoints (Kubernetes-compatible)
//! - OpenAPI spec
//! - CORS support for the browser client

pub mod airports;
pub mod chat;
pub mod flights;
pub mod health;
pub mod tools;
pub mod weather;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::db::DbClient;
use crate::openapi::ApiDoc;
use crate::orchestrator::Orchestrator;
use crate::tools::ToolExecutor;

// Re-export route creation functions for convenience
pub use airports::create_router as airports_router;
pub use chat::create_router as chat_router;
pub use flights::create_router as flights_router;
pub use health::create_router as health_router;
pub use tools::create_router as tools_router;
pub use weather::create_router as weather_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        // Production mode: only allow configured origins
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

// ============================================================================
// ROUTER ASSEMBLY
// ============================================================================

/// Create the complete API router.
///
/// - Chat + tool + data routes under /api/*
/// - Health checks under /health/* (readiness checks the database)
/// - OpenAPI spec at /openapi.json
/// - Request tracing and CORS applied to everything
pub fn create_api_router(
    db: DbClient,
    orchestrator: Arc<Orchestrator>,
    executor: Arc<ToolExecutor>,
    config: &ApiConfig,
) -> Router {
    let api_routes = Router::new()
        .merge(chat::create_router(orchestrator, config.chat_timeout))
        .merge(tools::create_router(executor))
        .merge(flights::create_router(db.clone()))
        .merge(airports::create_router(db.clone()))
        .merge(weather::create_router(db.clone()));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::create_router(db))
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}
