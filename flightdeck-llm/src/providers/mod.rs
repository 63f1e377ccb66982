//! LLM provider implementations
//!
//! Concrete implementations of the [`ChatProvider`](crate::ChatProvider)
//! trait. Currently only the OpenAI-compatible chat-completions API is
//! supported.

use flightdeck_core::LlmError;

pub mod openai;

pub use openai::{OpenAiChatProvider, OpenAiClient};

pub(crate) fn request_failed(
    provider: &str,
    status: i32,
    message: impl Into<String>,
) -> LlmError {
    LlmError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    }
}

pub(crate) fn rate_limited(provider: &str, retry_after_ms: i64) -> LlmError {
    LlmError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    }
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> LlmError {
    LlmError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    }
}
