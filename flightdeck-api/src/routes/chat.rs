//! Chat Endpoint
//!
//! POST /api/chat runs one full orchestrated exchange: user message in,
//! final assistant answer plus the activity log out. The whole exchange
//! runs under a single deadline; on any abort the log collected so far is
//! still returned with `success: false`, never an opaque HTTP failure.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use flightdeck_core::{ActivityLog, ActivityLogEntry, ActivityType, AgentLabel, ChatMessage, TokenUsage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};
use crate::orchestrator::Orchestrator;

// ============================================================================
// TYPES
// ============================================================================

/// Chat request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
pub struct ChatRequestBody {
    /// The user's message. Must be non-empty after trimming.
    pub message: String,
    /// Prior turns of this conversation, oldest first. Passed through
    /// unchanged; the server never mutates supplied history.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Chat response body, for both the success and the failure path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
pub struct ChatResponseBody {
    pub success: bool,
    /// The assistant's final answer (success path only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// What went wrong (failure path only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Ordered activity log for this exchange.
    pub logs: Vec<ActivityLogEntry>,
    /// Token accounting from the last model call (success path only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Clone)]
pub struct ChatState {
    pub orchestrator: Arc<Orchestrator>,
    pub timeout: Duration,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /api/chat - Run one orchestrated chat exchange
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "Exchange completed", body = ChatResponseBody),
        (status = 400, description = "Empty message", body = ApiError),
        (status = 502, description = "Chat provider failed", body = ChatResponseBody),
    ),
)]
pub async fn chat(
    State(state): State<Arc<ChatState>>,
    Json(req): Json<ChatRequestBody>,
) -> ApiResult<Response> {
    // Reject before any model call; an empty exchange produces no log.
    if req.message.trim().is_empty() {
        return Err(ApiError::validation_failed("Message cannot be empty"));
    }

    let mut log = ActivityLog::new();
    let exchange = state
        .orchestrator
        .run(&req.message, &req.history, &mut log);

    match tokio::time::timeout(state.timeout, exchange).await {
        Ok(Ok(outcome)) => Ok((
            StatusCode::OK,
            Json(ChatResponseBody {
                success: true,
                response: Some(outcome.response),
                error: None,
                logs: log.into_entries(),
                usage: outcome.usage,
            }),
        )
            .into_response()),
        Ok(Err(err)) => Ok(abort_response(err, log)),
        Err(_) => Ok(abort_response(
            ApiError::timeout("chat exchange"),
            log,
        )),
    }
}

/// Build the failure-path response: terminal `error` log entry, the
/// entries collected before the abort, and the error message itself.
fn abort_response(err: ApiError, mut log: ActivityLog) -> Response {
    tracing::error!(code = %err.code, message = %err.message, "Chat exchange aborted");
    log.record(
        AgentLabel::Orchestrator,
        "Error",
        err.message.clone(),
        ActivityType::Error,
    );

    (
        err.status_code(),
        Json(ChatResponseBody {
            success: false,
            response: None,
            error: Some(err.message),
            logs: log.into_entries(),
            usage: None,
        }),
    )
        .into_response()
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the chat router.
pub fn create_router(orchestrator: Arc<Orchestrator>, timeout: Duration) -> Router {
    let state = Arc::new(ChatState {
        orchestrator,
        timeout,
    });

    Router::new().route("/chat", post(chat)).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_defaults_empty_history() {
        let req: ChatRequestBody =
            serde_json::from_str(r#"{"message": "VN123"}"#).unwrap();
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_success_body_omits_error_fields() {
        let body = ChatResponseBody {
            success: true,
            response: Some("All clear".to_string()),
            error: None,
            logs: Vec::new(),
            usage: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("error").is_none());
        assert!(value.get("usage").is_none());
    }
}
