//! Agent runtime for advisor-rs
//!
//! [`AgentExecutor`] drives the LLM loop (completion, tool calls, results,
//! repeat) and [`ToolAgent`] exposes it through the [`advisor_core::Agent`]
//! trait.

pub mod agents;
pub mod executor;

pub use agents::ToolAgent;
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig, RunOutput};
