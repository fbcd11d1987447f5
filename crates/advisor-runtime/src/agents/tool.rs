//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::{AgentExecutor, RunOutput};
use advisor_core::{Agent, AgentResponse, Result};
use async_trait::async_trait;

/// An agent that runs the LLM loop with tool execution
///
/// The final assistant message is handed back as an [`AgentResponse::Object`]
/// so callers normalize it like any other structured response.
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String) -> Result<AgentResponse> {
        Ok(match self.executor.run(input).await? {
            RunOutput::Message(message) => AgentResponse::object(message),
            RunOutput::Text(text) => AgentResponse::Text(text),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::ScriptedProvider;
    use advisor_core::normalize;
    use advisor_llm::{Message, StopReason};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_process_wraps_final_message() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .reply(Message::assistant("1. Nike Pegasus 41"), StopReason::EndTurn),
        );
        let executor = AgentExecutor::builder().provider(provider).build().unwrap();
        let agent = ToolAgent::new(executor, "shopping partner");

        let response = agent.process("running shoes".to_string()).await.unwrap();
        assert!(matches!(response, AgentResponse::Object(_)));
        assert_eq!(normalize(&response), "1. Nike Pegasus 41");
        assert_eq!(agent.name(), "shopping partner");
    }

    #[tokio::test]
    async fn test_truncated_run_is_text() {
        let provider = Arc::new(
            ScriptedProvider::default().reply(Message::assistant("partial"), StopReason::MaxTokens),
        );
        let executor = AgentExecutor::builder().provider(provider).build().unwrap();
        let agent = ToolAgent::new(executor, "agent");

        let response = agent.process("q".to_string()).await.unwrap();
        assert_eq!(normalize(&response), "Response truncated due to token limit");
    }
}
