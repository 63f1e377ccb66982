//! Direct tool invocation surface
//!
//! POST /api/tools/{tool} executes one tool without going through the
//! model. Used for diagnostics and tests. Classified tool errors map to
//! HTTP statuses here (400 missing/invalid, 404 not found); unknown tool
//! names still succeed with the executor's sentinel payload.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::tools::ToolExecutor;

// ============================================================================
// TYPES
// ============================================================================

/// Direct tool invocation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
pub struct DirectToolResponse {
    pub success: bool,
    pub tool: String,
    /// The argument record as received.
    #[schema(value_type = Object)]
    pub args: JsonValue,
    /// The tool's result payload.
    #[schema(value_type = Object)]
    pub result: JsonValue,
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Clone)]
pub struct ToolsState {
    pub executor: Arc<ToolExecutor>,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /api/tools/{tool} - Execute one tool directly
#[utoipa::path(
    post,
    path = "/api/tools/{tool}",
    tag = "Tools",
    params(
        ("tool" = String, Path, description = "Tool name, e.g. search_flight")
    ),
    request_body(content = Object, description = "Tool argument record"),
    responses(
        (status = 200, description = "Tool execution result", body = DirectToolResponse),
        (status = 400, description = "Missing or invalid argument", body = ApiError),
        (status = 404, description = "Lookup key not found", body = ApiError),
    ),
)]
pub async fn call_tool(
    State(state): State<Arc<ToolsState>>,
    Path(tool): Path<String>,
    Json(args): Json<JsonValue>,
) -> ApiResult<impl IntoResponse> {
    tracing::debug!(%tool, "Direct tool call");

    let result = state
        .executor
        .execute(&tool, &args)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DirectToolResponse {
        success: true,
        tool,
        args,
        result,
    }))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the direct tool invocation router.
pub fn create_router(executor: Arc<ToolExecutor>) -> Router {
    let state = Arc::new(ToolsState { executor });

    Router::new()
        .route("/tools/:tool", post(call_tool))
        .with_state(state)
}
