//! Shared helpers for integration tests
#![allow(dead_code)]

use flightdeck_api::ToolDispatcher;
use flightdeck_core::ToolError;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted tool dispatcher: echoes the call back as the payload, or
/// fails with a configured error. Records the order of invocations.
#[derive(Default)]
pub struct ScriptedTools {
    failures: Mutex<HashMap<String, ToolError>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every dispatch sleeps this long first; used for deadline tests.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Make the named tool fail with the given error.
    pub fn fail_with(self, tool: &str, error: ToolError) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(tool.to_string(), error);
        self
    }

    /// Tool names dispatched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ToolDispatcher for ScriptedTools {
    async fn dispatch(&self, name: &str, args: &JsonValue) -> Result<JsonValue, ToolError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.calls.lock().unwrap().push(name.to_string());

        if let Some(err) = self.failures.lock().unwrap().get(name) {
            return Err(err.clone());
        }

        Ok(json!({ "tool": name, "args": args }))
    }
}

/// A tool-call request with a predictable id.
pub fn call(id: &str, name: &str, args: JsonValue) -> flightdeck_core::ToolCallRequest {
    flightdeck_core::ToolCallRequest {
        id: id.to_string(),
        name: name.to_string(),
        arguments: args,
    }
}
