//! Core abstractions for advisor-rs
//!
//! This crate defines the fundamental traits and types shared by the agent
//! layer: the [`Agent`] trait, the loosely shaped [`AgentResponse`] an agent
//! hands back, and the [`normalize`] cascade that turns any response into text.

pub mod agent;
pub mod error;
pub mod response;

pub use agent::Agent;
pub use error::{Error, Result};
pub use response::{AgentResponse, ContentBearing, normalize};
