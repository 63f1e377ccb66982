//! Flightdeck API Server Entry Point
//!
//! Bootstraps configuration, the database pool, the chat provider, and
//! starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use flightdeck_api::{
    create_api_router, ApiConfig, ApiError, ApiResult, DbClient, DbConfig, Orchestrator,
    OrchestratorConfig, ToolExecutor,
};
use flightdeck_api::telemetry::init_tracing;
use flightdeck_llm::{ChatProvider, OpenAiChatProvider};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing();

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config)?;

    let provider: Arc<dyn ChatProvider> =
        Arc::new(OpenAiChatProvider::from_env().map_err(ApiError::from)?);
    tracing::info!(model = provider.model_id(), "Chat provider configured");

    let executor = Arc::new(ToolExecutor::new(db.clone()));
    let orchestrator = Arc::new(Orchestrator::new(
        provider,
        executor.clone(),
        OrchestratorConfig::from_env(),
    ));

    let api_config = ApiConfig::from_env();
    let app: Router = create_api_router(db, orchestrator, executor, &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting Flightdeck API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("FLIGHTDECK_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("FLIGHTDECK_API_PORT").ok())
        .unwrap_or_else(|| "3001".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
