//! Flightdeck LLM - Chat Provider Abstraction
//!
//! Provider-agnostic trait for chat completions with tool calling.
//! The orchestration loop depends only on [`ChatProvider`]; concrete
//! providers live under [`providers`]. A deterministic mock provider is
//! included for driving loop tests without the network.

use flightdeck_core::{ChatMessage, LlmError, TokenUsage, ToolSpec};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;

pub mod providers;

pub use providers::openai::OpenAiChatProvider;

// ============================================================================
// CHAT COMPLETION CONTRACT
// ============================================================================

/// One chat-completion request.
///
/// Tools are always offered with `tool_choice = auto`: the model decides
/// whether to call zero, one, or several of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolSpec>,
    pub temperature: f32,
    pub max_tokens: i32,
}

/// One chat-completion result: the assistant's turn plus accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub message: ChatMessage,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

/// Trait for chat-completion providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// Providers must not retry failed requests on their own; the caller
/// decides whether a failure aborts the exchange.
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    /// Issue one completion request.
    ///
    /// # Returns
    /// * `Ok(ChatCompletion)` - The assistant's reply (text and/or tool calls)
    /// * `Err(LlmError)` - If the upstream call fails
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, LlmError>;

    /// Get the model identifier this provider targets.
    fn model_id(&self) -> &str;
}

// ============================================================================
// MOCK PROVIDER FOR TESTING
// ============================================================================

/// Mock chat provider for testing.
///
/// Pops a queue of scripted completions in order and records every request
/// it receives, so tests can assert on the evolving message sequence. An
/// exhausted script is an error: over-running it means the code under test
/// issued more model calls than the test expected.
pub struct MockChatProvider {
    script: Mutex<VecDeque<Result<ChatCompletion, LlmError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue the next scripted completion.
    pub fn enqueue(&self, completion: ChatCompletion) {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Ok(completion));
    }

    /// Queue a scripted failure.
    pub fn enqueue_error(&self, error: LlmError) {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Err(error));
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().expect("mock request lock").clone()
    }

    /// Convenience: a plain-text completion with zeroed usage.
    pub fn text_completion(content: impl Into<String>) -> ChatCompletion {
        ChatCompletion {
            message: ChatMessage::assistant(content),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        }
    }

    /// Convenience: a completion requesting the given tool calls.
    pub fn tool_call_completion(
        calls: Vec<flightdeck_core::ToolCallRequest>,
    ) -> ChatCompletion {
        ChatCompletion {
            message: ChatMessage::assistant_tool_calls(None, calls),
            usage: TokenUsage::default(),
            finish_reason: Some("tool_calls".to_string()),
        }
    }
}

impl Default for MockChatProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, LlmError> {
        self.requests
            .lock()
            .expect("mock request lock")
            .push(request);

        self.script
            .lock()
            .expect("mock script lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::InvalidResponse {
                    provider: "mock".to_string(),
                    reason: "script exhausted".to_string(),
                })
            })
    }

    fn model_id(&self) -> &str {
        "mock-chat"
    }
}

impl std::fmt::Debug for MockChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockChatProvider")
            .field(
                "scripted",
                &self.script.lock().map(|s| s.len()).unwrap_or(0),
            )
            .finish()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
