//! Tool catalogue and execution
//!
//! The registry declares the fixed set of tools surfaced to the model;
//! the executor runs one of them against the store. The orchestration
//! loop depends only on the [`ToolDispatcher`] seam, so loop tests can
//! substitute a scripted dispatcher for the database-backed executor.

use flightdeck_core::ToolError;
use serde_json::Value as JsonValue;

pub mod executor;
pub mod registry;

pub use executor::ToolExecutor;
pub use registry::available_tools;

/// Dispatch seam between the orchestration loop and tool execution.
#[async_trait::async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// Execute the named tool with the given argument record.
    ///
    /// Always yields *some* serializable payload for known-shape failures
    /// handled inside the tool (e.g. unknown tool names); classified
    /// errors are for the caller to route — feed back to the model when
    /// recoverable, abort the exchange otherwise.
    async fn dispatch(&self, name: &str, args: &JsonValue) -> Result<JsonValue, ToolError>;
}
