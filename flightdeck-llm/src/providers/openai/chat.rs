//! OpenAI chat provider implementation

use super::client::OpenAiClient;
use super::types::{
    CompletionRequest, CompletionResponse, FunctionCall, FunctionDefinition, Message, ToolCall,
    ToolDefinition, Usage,
};
use crate::providers::invalid_response;
use crate::{ChatCompletion, ChatProvider, ChatRequest};
use flightdeck_core::{ChatMessage, ChatRole, LlmError, TokenUsage, ToolCallRequest, ToolSpec};

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI chat-completion provider with tool calling.
pub struct OpenAiChatProvider {
    client: OpenAiClient,
    model: String,
}

impl OpenAiChatProvider {
    /// Create a new OpenAI chat provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name (e.g., "gpt-4o-mini", "gpt-4o")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: OpenAiClient::new(api_key, 60),
            model: model.into(),
        }
    }

    /// Create provider with the default gpt-4o-mini model.
    pub fn with_default_model(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_MODEL)
    }

    /// Create a provider from `OPENAI_API_KEY` and `OPENAI_MODEL`.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key =
            std::env::var("OPENAI_API_KEY").map_err(|_| LlmError::ProviderNotConfigured)?;
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAiChatProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, LlmError> {
        let wire_request = CompletionRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(to_wire_message).collect(),
            tool_choice: if request.tools.is_empty() {
                None
            } else {
                Some("auto".to_string())
            },
            tools: request.tools.iter().map(to_wire_tool).collect(),
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
        };

        let response: CompletionResponse =
            self.client.request("chat/completions", wire_request).await?;

        let usage = response.usage.map(from_wire_usage).unwrap_or_default();

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| invalid_response("openai", "No completion in response"))?;

        Ok(ChatCompletion {
            message: from_wire_message(choice.message)?,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// WIRE MAPPING
// ============================================================================

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
        ChatRole::Tool => "tool",
    }
}

fn to_wire_message(message: &ChatMessage) -> Message {
    let tool_calls = if message.tool_calls.is_empty() {
        None
    } else {
        Some(
            message
                .tool_calls
                .iter()
                .map(|call| ToolCall {
                    id: call.id.clone(),
                    kind: "function".to_string(),
                    function: FunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                })
                .collect(),
        )
    };

    Message {
        role: role_str(message.role).to_string(),
        content: message.content.clone(),
        tool_calls,
        tool_call_id: message.tool_call_id.clone(),
    }
}

fn to_wire_tool(spec: &ToolSpec) -> ToolDefinition {
    ToolDefinition {
        kind: "function".to_string(),
        function: FunctionDefinition {
            name: spec.name.clone(),
            description: spec.description.clone(),
            parameters: spec.parameters.clone(),
        },
    }
}

fn from_wire_message(message: Message) -> Result<ChatMessage, LlmError> {
    let tool_calls = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| {
            let arguments = serde_json::from_str(&call.function.arguments).map_err(|e| {
                invalid_response(
                    "openai",
                    format!(
                        "Malformed arguments for tool call {}: {}",
                        call.function.name, e
                    ),
                )
            })?;
            Ok(ToolCallRequest {
                id: call.id,
                name: call.function.name,
                arguments,
            })
        })
        .collect::<Result<Vec<_>, LlmError>>()?;

    Ok(ChatMessage {
        role: ChatRole::Assistant,
        content: message.content,
        tool_calls,
        tool_call_id: None,
    })
}

fn from_wire_usage(usage: Usage) -> TokenUsage {
    TokenUsage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens.unwrap_or(0),
        total_tokens: usage.total_tokens,
    }
}

impl std::fmt::Debug for OpenAiChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatProvider")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_tool_calls_roundtrip_to_wire() {
        let message = ChatMessage::assistant_tool_calls(
            None,
            vec![ToolCallRequest {
                id: "call_1".to_string(),
                name: "get_weather".to_string(),
                arguments: serde_json::json!({"airport_code": "HAN"}),
            }],
        );

        let wire = to_wire_message(&message);
        assert_eq!(wire.role, "assistant");
        let calls = wire.tool_calls.unwrap();
        assert_eq!(calls[0].function.name, "get_weather");
        // Arguments re-encode as a JSON string on the wire.
        let parsed: serde_json::Value =
            serde_json::from_str(&calls[0].function.arguments).unwrap();
        assert_eq!(parsed["airport_code"], "HAN");
    }

    #[test]
    fn test_malformed_wire_arguments_rejected() {
        let wire = Message {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                kind: "function".to_string(),
                function: FunctionCall {
                    name: "search_flight".to_string(),
                    arguments: "{not json".to_string(),
                },
            }]),
            tool_call_id: None,
        };

        let err = from_wire_message(wire).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse { .. }));
    }

    #[test]
    fn test_tool_turn_maps_role_and_call_id() {
        let wire = to_wire_message(&ChatMessage::tool("call_7", "{\"ok\":true}"));
        assert_eq!(wire.role, "tool");
        assert_eq!(wire.tool_call_id.as_deref(), Some("call_7"));
        assert!(wire.tool_calls.is_none());
    }
}
