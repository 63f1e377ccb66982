//! Tool orchestration loop
//!
//! Drives repeated chat-completion calls for one exchange: sends the
//! conversation, executes whatever tools the model requests, feeds the
//! results back, and repeats until the model produces a final answer or
//! the round ceiling is reached. Reaching the ceiling is a graceful stop,
//! not an error — the loop returns whatever assistant content is
//! available.
//!
//! Every step is recorded in the exchange's activity log. Tool calls
//! within a round run sequentially, in the order the model emitted them,
//! so the log order and the tool-turn order always match the request
//! order.

use crate::constants::{LOG_RESULT_MAX_CHARS, SYSTEM_PROMPT};
use crate::error::{ApiError, ApiResult};
use crate::tools::{available_tools, ToolDispatcher};
use flightdeck_core::{
    agent_for_tool, ActivityLog, ActivityType, AgentLabel, ChatMessage, TokenUsage, ToolSpec,
};
use flightdeck_llm::{ChatProvider, ChatRequest};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Tuning knobs for the orchestration loop.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum tool-call rounds per exchange.
    pub max_tool_rounds: usize,
    /// Ceiling on the message sequence length; once reached the loop
    /// stops requesting further tools even below the round cap.
    pub max_messages: usize,
    /// Sampling temperature for every model call.
    pub temperature: f32,
    /// Output token budget for every model call.
    pub max_tokens: i32,
    /// System prompt prepended to every exchange.
    pub system_prompt: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: 10,
            max_messages: 64,
            temperature: 0.7,
            max_tokens: 2000,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }
}

impl OrchestratorConfig {
    /// Create a configuration from environment variables, falling back to
    /// the defaults above.
    ///
    /// Environment variables:
    /// - `FLIGHTDECK_MAX_TOOL_ROUNDS` (default: 10)
    /// - `FLIGHTDECK_MAX_MESSAGES` (default: 64)
    /// - `FLIGHTDECK_TEMPERATURE` (default: 0.7)
    /// - `FLIGHTDECK_MAX_TOKENS` (default: 2000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_tool_rounds: env_parse("FLIGHTDECK_MAX_TOOL_ROUNDS", defaults.max_tool_rounds),
            max_messages: env_parse("FLIGHTDECK_MAX_MESSAGES", defaults.max_messages),
            temperature: env_parse("FLIGHTDECK_TEMPERATURE", defaults.temperature),
            max_tokens: env_parse("FLIGHTDECK_MAX_TOKENS", defaults.max_tokens),
            system_prompt: defaults.system_prompt,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Final result of one successfully completed exchange.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The assistant's final text (may be empty when the round ceiling
    /// cut the model off mid-plan).
    pub response: String,
    /// Token accounting from the last model call.
    pub usage: Option<TokenUsage>,
}

/// The orchestration loop. One instance is shared across exchanges; all
/// per-exchange state (messages, log, round counter) lives in [`run`].
pub struct Orchestrator {
    provider: Arc<dyn ChatProvider>,
    tools: Arc<dyn ToolDispatcher>,
    registry: Vec<ToolSpec>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        tools: Arc<dyn ToolDispatcher>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            registry: available_tools(),
            config,
        }
    }

    /// Run one exchange to completion.
    ///
    /// The supplied history is treated as already-valid prior turns; it is
    /// only read, never mutated. Loop-level failures (provider errors,
    /// store unavailability) abort the exchange; the caller records the
    /// terminal `error` log entry and returns the entries collected so
    /// far.
    pub async fn run(
        &self,
        message: &str,
        history: &[ChatMessage],
        log: &mut ActivityLog,
    ) -> ApiResult<ChatOutcome> {
        log.record(
            AgentLabel::Orchestrator,
            "Received",
            format!("User: \"{}\"", message),
            ActivityType::Request,
        );

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.config.system_prompt.as_str()));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(message));

        log.record(
            AgentLabel::Orchestrator,
            "[LLM] Request",
            format!("Sending to {}...", self.provider.model_id()),
            ActivityType::Llm,
        );
        let mut completion = self
            .provider
            .complete(self.request_for(&messages))
            .await
            .map_err(ApiError::from)?;

        let mut rounds = 0;
        while completion.message.has_tool_calls()
            && rounds < self.config.max_tool_rounds
            && messages.len() < self.config.max_messages
        {
            rounds += 1;
            let assistant = completion.message.clone();
            let mut tool_turns = Vec::with_capacity(assistant.tool_calls.len());

            for call in &assistant.tool_calls {
                let agent = agent_for_tool(&call.name);
                log.record(
                    AgentLabel::Orchestrator,
                    "[A2A] Delegate",
                    format!("→ {} Agent: {}", agent, call.name),
                    ActivityType::A2a,
                );
                log.record(
                    agent,
                    "[MCP] Execute",
                    format!("{}({})", call.name, call.arguments),
                    ActivityType::Mcp,
                );

                let payload = match self.tools.dispatch(&call.name, &call.arguments).await {
                    Ok(payload) => payload,
                    // Recoverable tool errors become ordinary results the
                    // model reasons over; only store failures abort.
                    Err(err) if err.is_recoverable() => json!({ "error": err.to_string() }),
                    Err(err) => return Err(err.into()),
                };

                let serialized = payload.to_string();
                log.record(
                    agent,
                    "Result",
                    truncate_for_log(&serialized),
                    ActivityType::Success,
                );
                tool_turns.push(ChatMessage::tool(call.id.clone(), serialized));
            }

            // Append the assistant's tool-call turn, then its results, in
            // the order the model requested them.
            messages.push(assistant);
            messages.append(&mut tool_turns);

            log.record(
                AgentLabel::Orchestrator,
                "[LLM] Continue",
                "Processing tool results...",
                ActivityType::Llm,
            );
            completion = self
                .provider
                .complete(self.request_for(&messages))
                .await
                .map_err(ApiError::from)?;
        }

        if completion.message.has_tool_calls() {
            tracing::warn!(
                rounds,
                messages = messages.len(),
                "Exchange stopped requesting tools at the ceiling"
            );
        }

        log.record(
            AgentLabel::Orchestrator,
            "Complete",
            "Response generated",
            ActivityType::Complete,
        );

        Ok(ChatOutcome {
            response: completion.message.text().to_string(),
            usage: Some(completion.usage),
        })
    }

    fn request_for(&self, messages: &[ChatMessage]) -> ChatRequest {
        ChatRequest {
            messages: messages.to_vec(),
            tools: self.registry.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("model", &self.provider.model_id())
            .field("tools", &self.registry.len())
            .field("max_tool_rounds", &self.config.max_tool_rounds)
            .finish()
    }
}

/// Truncate a log detail line on a character boundary.
fn truncate_for_log(text: &str) -> String {
    if text.chars().count() <= LOG_RESULT_MAX_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(LOG_RESULT_MAX_CHARS).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_line_untouched() {
        assert_eq!(truncate_for_log("{\"ok\":true}"), "{\"ok\":true}");
    }

    #[test]
    fn test_truncate_long_line_to_limit() {
        let long = "x".repeat(250);
        let truncated = truncate_for_log(&long);
        assert_eq!(truncated.chars().count(), LOG_RESULT_MAX_CHARS + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Multibyte content must not split a code point.
        let long = "thời tiết Hà Nội ".repeat(20);
        let truncated = truncate_for_log(&long);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_default_config_matches_contract() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.max_tool_rounds, 10);
        assert_eq!(config.max_tokens, 2000);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }
}
