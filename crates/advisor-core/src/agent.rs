//! Core Agent trait definition

use crate::{AgentResponse, Result};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// The output is an [`AgentResponse`] rather than a plain string because the
/// shape of what an agent runtime returns is not stable across providers and
/// configurations. Callers that need text run it through [`crate::normalize`].
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return the raw agent response
    async fn process(&self, input: String) -> Result<AgentResponse>;

    /// Get the agent's name
    fn name(&self) -> &str;
}
