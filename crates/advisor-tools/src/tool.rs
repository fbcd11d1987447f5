//! Tool trait definition

use advisor_core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Each tool provides a name, a description and a JSON schema for its input.
/// The name must be unique within a [`crate::ToolRegistry`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with parameters matching [`Tool::input_schema`]
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    fn name(&self) -> &str;

    /// Get the tool's description, phrased for the model
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;
}
