//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history and available tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return the final assistant message

use advisor_core::{Error, Result};
use advisor_llm::{
    CompletionRequest, ContentBlock, LLMProvider, Message, StopReason, ToolDefinition,
};
use advisor_tools::ToolRegistry;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Default model for the hosted Gemini endpoint
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of iterations (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            max_tokens: advisor_llm::completion::DEFAULT_MAX_TOKENS,
            temperature: Some(0.7),
        }
    }
}

/// What a finished run hands back
///
/// A natural end of turn yields the model's final message as is; the loop
/// guards (iteration cap, token limit) yield a plain status text.
#[derive(Debug, Clone)]
pub enum RunOutput {
    /// Final assistant message
    Message(Message),
    /// Status text produced by the executor itself
    Text(String),
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Start building an executor
    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute the agent loop with a single user message
    pub async fn run(&self, user_message: String) -> Result<RunOutput> {
        self.run_conversation(vec![Message::user(user_message)])
            .await
    }

    async fn run_conversation(&self, mut conversation: Vec<Message>) -> Result<RunOutput> {
        let tools = self.build_tool_definitions();
        debug!(tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration,
                max_iterations = self.config.max_iterations,
                model = %self.config.model,
                "Agent iteration started"
            );

            let mut request = CompletionRequest::new(&self.config.model)
                .messages(conversation.clone())
                .max_tokens(self.config.max_tokens)
                .temperature(self.config.temperature)
                .tools(tools.clone());
            if let Some(system) = &self.config.system_prompt {
                request = request.system(system.clone());
            }

            let response = self
                .provider
                .complete(request)
                .await
                .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            match response.stop_reason {
                StopReason::EndTurn => {
                    debug!(
                        response_length = response.message.text().map_or(0, str::len),
                        "Agent completed naturally"
                    );
                    return Ok(RunOutput::Message(response.message));
                }
                StopReason::ToolUse => {
                    let results = self.execute_tools(&response.message).await;
                    conversation.push(response.message);
                    if results.is_empty() {
                        warn!("No tool results despite ToolUse stop reason");
                        return Ok(RunOutput::Text("Tool execution failed".to_string()));
                    }
                    conversation.extend(results);
                }
                StopReason::MaxTokens => {
                    warn!("Hit max tokens in LLM response");
                    return Ok(RunOutput::Text(
                        "Response truncated due to token limit".to_string(),
                    ));
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        Ok(RunOutput::Text(
            "Max iterations reached without completion".to_string(),
        ))
    }

    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute each tool call; failures are reported back to the model as error results
    async fn execute_tools(&self, message: &Message) -> Vec<Message> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            let Some(tool) = self.tool_registry.get(name) else {
                warn!(tool_name = %name, "Tool not found");
                results.push(Message::tool_error(
                    id.clone(),
                    format!("Error: tool '{name}' is not available"),
                ));
                continue;
            };

            let start = Instant::now();
            match tool.execute(input.clone()).await {
                Ok(result) => {
                    let result_str = result.to_string();
                    info!(
                        tool_name = %name,
                        duration_ms = start.elapsed().as_millis() as u64,
                        result_length = result_str.len(),
                        "Tool execution succeeded"
                    );
                    results.push(Message::tool_result(id.clone(), result_str));
                }
                Err(e) => {
                    warn!(
                        tool_name = %name,
                        duration_ms = start.elapsed().as_millis() as u64,
                        error = %e,
                        "Tool execution failed"
                    );
                    results.push(Message::tool_error(id.clone(), format!("Error: {e}")));
                }
            }
        }

        results
    }
}

/// Builder for AgentExecutor
#[derive(Default)]
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        Ok(AgentExecutor::new(
            provider,
            self.tool_registry.unwrap_or_default(),
            self.config,
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedProvider;
    use super::*;
    use advisor_core::Result as CoreResult;
    use advisor_llm::{MessageContent, Role};
    use advisor_tools::Tool;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct FakeSearch;

    #[async_trait]
    impl Tool for FakeSearch {
        async fn execute(&self, params: Value) -> CoreResult<Value> {
            Ok(json!([{ "title": format!("Result for {}", params["query"]) }]))
        }

        fn name(&self) -> &str {
            "search_web"
        }

        fn description(&self) -> &str {
            "Search"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    fn tool_call(name: &str) -> Message {
        Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: name.to_string(),
                input: json!({"query": "headphones"}),
            }])),
        }
    }

    fn executor(provider: Arc<ScriptedProvider>) -> AgentExecutor {
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(FakeSearch));
        AgentExecutor::builder()
            .provider(provider)
            .tool_registry(registry)
            .system_prompt("You recommend products")
            .max_iterations(3)
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.model, "gemini-2.0-flash-exp");
    }

    #[test]
    fn test_builder_requires_provider() {
        assert!(matches!(
            AgentExecutorBuilder::new().build(),
            Err(Error::InitializationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_end_turn_returns_message() {
        let provider = Arc::new(
            ScriptedProvider::default().reply(Message::assistant("Top pick"), StopReason::EndTurn),
        );
        let output = executor(provider.clone()).run("find".to_string()).await.unwrap();

        assert!(matches!(output, RunOutput::Message(ref m) if m.text() == Some("Top pick")));
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].system.as_deref(), Some("You recommend products"));
        assert_eq!(requests[0].tools.len(), 1);
    }

    #[tokio::test]
    async fn test_tool_loop_feeds_results_back() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .reply(tool_call("search_web"), StopReason::ToolUse)
                .reply(Message::assistant("Sony WH-1000XM5"), StopReason::EndTurn),
        );
        let output = executor(provider.clone()).run("find".to_string()).await.unwrap();
        assert!(matches!(output, RunOutput::Message(_)));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        // user, assistant tool call, tool result
        assert_eq!(requests[1].messages.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_tool_reported_to_model() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .reply(tool_call("crawl_site"), StopReason::ToolUse)
                .reply(Message::assistant("done"), StopReason::EndTurn),
        );
        executor(provider.clone()).run("find".to_string()).await.unwrap();

        let requests = provider.requests.lock().unwrap();
        let last = requests[1].messages.last().unwrap();
        assert!(matches!(
            &last.content,
            Some(MessageContent::Blocks(blocks))
                if matches!(&blocks[0], ContentBlock::ToolResult { is_error: Some(true), .. })
        ));
    }

    #[tokio::test]
    async fn test_iteration_cap() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .reply(tool_call("search_web"), StopReason::ToolUse)
                .reply(tool_call("search_web"), StopReason::ToolUse)
                .reply(tool_call("search_web"), StopReason::ToolUse),
        );
        let output = executor(provider).run("find".to_string()).await.unwrap();
        assert!(
            matches!(output, RunOutput::Text(t) if t == "Max iterations reached without completion")
        );
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(ScriptedProvider::default().fail("quota exceeded"));
        let err = executor(provider).run("find".to_string()).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
