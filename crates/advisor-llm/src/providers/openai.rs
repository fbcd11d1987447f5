//! OpenAI-compatible chat completions provider
//!
//! Speaks the `/chat/completions` wire format. Gemini exposes the same format
//! under its own base URL, which is what [`OpenAIConfig::gemini`] targets.
//! See: https://platform.openai.com/docs/api-reference/chat

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Result, Role, StopReason, TokenUsage, ToolDefinition,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
/// Gemini's OpenAI-compatible endpoint
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for an OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL of the chat completions API
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,

    /// Name reported by [`LLMProvider::name`]
    pub label: String,
}

impl OpenAIConfig {
    /// Create a config for the OpenAI API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            label: "openai".to_string(),
        }
    }

    /// Create a config for Gemini through its OpenAI-compatible endpoint
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            api_base: GEMINI_API_BASE.to_string(),
            label: "gemini".to_string(),
            ..Self::new(api_key)
        }
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Provider for any OpenAI-compatible chat completions endpoint
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a provider from a configuration
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LLMError::ConfigurationError("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = ChatRequest {
            model: request.model.clone(),
            messages: build_chat_messages(request.system, request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: convert_tools(&request.tools),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(request.model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".to_string()))?;

        let usage = chat.usage.unwrap_or_default();
        debug!(
            finish_reason = ?choice.finish_reason,
            input_tokens = usage.prompt_tokens,
            output_tokens = usage.completion_tokens,
            "Received completion"
        );

        let message = parse_response_message(choice.message)?;
        let stop_reason = map_stop_reason(choice.finish_reason.as_deref(), &message);

        Ok(CompletionResponse {
            message,
            stop_reason,
            usage: TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &str {
        &self.config.label
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ChatTool>,
}

#[derive(Debug, Serialize, PartialEq)]
struct ChatMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ChatToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &'static str, content: String) -> Self {
        Self {
            role,
            content: Some(content),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: ChatFunction,
}

#[derive(Debug, Serialize)]
struct ChatFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct ChatToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    tool_type: String,
    function: ChatFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct ChatFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// System prompt goes first, then each message; tool results become `tool` turns
fn build_chat_messages(system: Option<String>, messages: Vec<Message>) -> Vec<ChatMessage> {
    let mut result = Vec::with_capacity(messages.len() + 1);

    if let Some(sys) = system {
        result.push(ChatMessage::text("system", sys));
    }

    for msg in messages {
        let role = match msg.role {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        };

        match msg.content {
            Some(MessageContent::Text(text)) => result.push(ChatMessage::text(role, text)),
            Some(MessageContent::Blocks(blocks)) => result.extend(convert_blocks(role, blocks)),
            None => result.push(ChatMessage::text(role, String::new())),
        }
    }

    result
}

fn convert_blocks(role: &'static str, blocks: Vec<ContentBlock>) -> Vec<ChatMessage> {
    let mut tool_turns = Vec::new();
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => texts.push(text),
            ContentBlock::ToolUse { id, name, input } => tool_calls.push(ChatToolCall {
                id,
                tool_type: function_type(),
                function: ChatFunctionCall {
                    name,
                    arguments: input.to_string(),
                },
            }),
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => tool_turns.push(ChatMessage {
                role: "tool",
                content: Some(content),
                tool_calls: Vec::new(),
                tool_call_id: Some(tool_use_id),
            }),
        }
    }

    let mut messages = Vec::new();
    if !texts.is_empty() || !tool_calls.is_empty() {
        messages.push(ChatMessage {
            role,
            content: (!texts.is_empty()).then(|| texts.join("\n")),
            tool_calls,
            tool_call_id: None,
        });
    }
    messages.extend(tool_turns);
    messages
}

fn convert_tools(tools: &[ToolDefinition]) -> Vec<ChatTool> {
    tools
        .iter()
        .map(|tool| ChatTool {
            tool_type: "function",
            function: ChatFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

fn parse_response_message(msg: ChatResponseMessage) -> Result<Message> {
    let mut blocks = Vec::new();

    if let Some(content) = msg.content.filter(|c| !c.is_empty()) {
        blocks.push(ContentBlock::Text { text: content });
    }

    for call in msg.tool_calls.unwrap_or_default() {
        let input = if call.function.arguments.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&call.function.arguments).map_err(|e| {
                LLMError::UnexpectedResponse(format!("Failed to parse tool arguments: {e}"))
            })?
        };

        blocks.push(ContentBlock::ToolUse {
            id: call.id,
            name: call.function.name,
            input,
        });
    }

    Ok(Message {
        role: Role::Assistant,
        content: Some(MessageContent::Blocks(blocks)),
    })
}

/// Some compatible endpoints report `stop` even when tool calls are present
fn map_stop_reason(reason: Option<&str>, message: &Message) -> StopReason {
    if message.has_tool_uses() {
        return StopReason::ToolUse;
    }
    match reason {
        Some("length") => StopReason::MaxTokens,
        Some("tool_calls") => StopReason::ToolUse,
        Some("stop") | None => StopReason::EndTurn,
        Some(other) => {
            debug!("Unknown finish reason: {}", other);
            StopReason::EndTurn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gemini_preset() {
        let provider = OpenAIProvider::with_config(OpenAIConfig::gemini("key")).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.config().api_base, GEMINI_API_BASE);
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = OpenAIProvider::with_config(OpenAIConfig::new("  "));
        assert!(matches!(result, Err(LLMError::ConfigurationError(_))));
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let config = OpenAIConfig::new("k").with_api_base("http://localhost:1234/v1/");
        assert_eq!(config.api_base, "http://localhost:1234/v1");
    }

    #[test]
    fn test_tool_round_trip_messages() {
        let assistant = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: "search_web".to_string(),
                input: json!({"query": "trail shoes"}),
            }])),
        };
        let result = Message::tool_result("call_1".to_string(), "[]".to_string());

        let messages = build_chat_messages(
            Some("sys".to_string()),
            vec![Message::user("find shoes"), assistant, result],
        );

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[2].content, None);
        assert_eq!(messages[2].tool_calls[0].function.name, "search_web");
        assert_eq!(messages[3].role, "tool");
        assert_eq!(messages[3].tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn test_parse_tool_call_response() {
        let raw: ChatResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "scrape_website", "arguments": "{\"url\":\"https://example.com\"}"}
                    }]
                },
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        let choice = raw.choices.into_iter().next().unwrap();
        let message = parse_response_message(choice.message).unwrap();
        assert_eq!(
            map_stop_reason(choice.finish_reason.as_deref(), &message),
            StopReason::ToolUse
        );
        assert!(raw.usage.is_none());
    }

    #[test]
    fn test_stop_reason_mapping() {
        let plain = Message::assistant("done");
        assert_eq!(map_stop_reason(Some("stop"), &plain), StopReason::EndTurn);
        assert_eq!(map_stop_reason(Some("length"), &plain), StopReason::MaxTokens);
        assert_eq!(map_stop_reason(Some("content_filter"), &plain), StopReason::EndTurn);
    }
}
