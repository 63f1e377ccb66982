//! Chat endpoint tests
//!
//! Exercise the HTTP surface of /api/chat against scripted collaborators:
//! request validation, the success and failure response shapes, and the
//! exchange deadline.

mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use flightdeck_api::routes::chat;
use flightdeck_api::{Orchestrator, OrchestratorConfig, ToolDispatcher};
use flightdeck_core::ToolError;
use flightdeck_llm::{ChatProvider, MockChatProvider};
use http_body_util::BodyExt;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use std::time::Duration;
use support::{call, ScriptedTools};
use tower::ServiceExt;

fn chat_app(
    mock: Arc<MockChatProvider>,
    tools: Arc<ScriptedTools>,
    timeout: Duration,
) -> Router {
    let provider: Arc<dyn ChatProvider> = mock;
    let dispatcher: Arc<dyn ToolDispatcher> = tools;
    let orchestrator = Arc::new(Orchestrator::new(
        provider,
        dispatcher,
        OrchestratorConfig::default(),
    ));
    Router::new().nest("/api", chat::create_router(orchestrator, timeout))
}

async fn post_chat(app: Router, body: JsonValue) -> (StatusCode, JsonValue) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn empty_message_is_rejected_before_any_model_call() {
    let mock = Arc::new(MockChatProvider::new());
    let tools = Arc::new(ScriptedTools::new());
    let app = chat_app(mock.clone(), tools, Duration::from_secs(5));

    let (status, body) =
        post_chat(app, json!({"message": "   ", "history": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Message cannot be empty"));
    // Rejected up front: the provider never saw a request.
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn successful_exchange_returns_answer_and_ordered_log() {
    let mock = Arc::new(MockChatProvider::new());
    mock.enqueue(MockChatProvider::tool_call_completion(vec![call(
        "call_1",
        "search_flight",
        json!({"flight_code": "VN123"}),
    )]));
    mock.enqueue(MockChatProvider::text_completion("VN123 is on time."));
    let tools = Arc::new(ScriptedTools::new());
    let app = chat_app(mock, tools, Duration::from_secs(5));

    let (status, body) = post_chat(app, json!({"message": "VN123?"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], "VN123 is on time.");

    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.first().unwrap()["type"], "request");
    assert_eq!(logs.last().unwrap()["type"], "complete");
    assert_eq!(
        logs.iter().filter(|l| l["type"] == "request").count(),
        1
    );
    assert_eq!(
        logs.iter().filter(|l| l["type"] == "complete").count(),
        1
    );
}

#[tokio::test]
async fn provider_failure_returns_success_false_with_partial_log() {
    let mock = Arc::new(MockChatProvider::new());
    mock.enqueue_error(flightdeck_core::LlmError::RequestFailed {
        provider: "openai".to_string(),
        status: 429,
        message: "quota exceeded".to_string(),
    });
    let tools = Arc::new(ScriptedTools::new());
    let app = chat_app(mock, tools, Duration::from_secs(5));

    let (status, body) = post_chat(app, json!({"message": "hello"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("quota exceeded"));

    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.last().unwrap()["type"], "error");
    assert!(logs.iter().all(|l| l["type"] != "complete"));
}

#[tokio::test]
async fn store_failure_maps_to_server_error_shape() {
    let mock = Arc::new(MockChatProvider::new());
    mock.enqueue(MockChatProvider::tool_call_completion(vec![call(
        "call_1",
        "search_flight",
        json!({"flight_code": "VN123"}),
    )]));
    let tools = Arc::new(ScriptedTools::new().fail_with(
        "search_flight",
        ToolError::Database {
            reason: "connection refused".to_string(),
        },
    ));
    let app = chat_app(mock, tools, Duration::from_secs(5));

    let (status, body) = post_chat(app, json!({"message": "VN123?"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    // Entries collected before the abort are preserved.
    let logs = body["logs"].as_array().unwrap();
    assert!(logs.iter().any(|l| l["type"] == "mcp"));
    assert_eq!(logs.last().unwrap()["type"], "error");
}

#[tokio::test]
async fn exchange_deadline_aborts_with_timeout_and_logs() {
    let mock = Arc::new(MockChatProvider::new());
    mock.enqueue(MockChatProvider::tool_call_completion(vec![call(
        "call_1",
        "list_flights",
        json!({}),
    )]));
    // The tool sleeps past the deadline.
    let tools = Arc::new(ScriptedTools::with_delay(Duration::from_millis(200)));
    let app = chat_app(mock, tools, Duration::from_millis(20));

    let (status, body) = post_chat(app, json!({"message": "list"})).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("timed out"));

    // Whatever was logged before the deadline still comes back.
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.first().unwrap()["type"], "request");
    assert_eq!(logs.last().unwrap()["type"], "error");
}
