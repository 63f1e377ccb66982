//! Flightdeck API - REST API Layer and Tool Orchestration
//!
//! This crate provides the HTTP surface of the Flightdeck assistant and
//! the tool-orchestration loop behind it. The chat endpoint drives
//! repeated chat-completion calls, executes the tools the model requests
//! against the flight store, and returns the final answer together with
//! the per-exchange activity log.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod openapi;
pub mod orchestrator;
pub mod routes;
pub mod telemetry;
pub mod tools;

// Re-export commonly used types
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use orchestrator::{ChatOutcome, Orchestrator, OrchestratorConfig};
pub use routes::create_api_router;
pub use tools::{available_tools, ToolDispatcher, ToolExecutor};
