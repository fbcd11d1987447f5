//! Shared utilities for advisor-rs
//!
//! This crate provides common functionality used across the advisor-rs workspace:
//! tracing setup and the deployment environment switch.

pub mod environment;
pub mod logging;

pub use environment::Environment;
pub use logging::{LogFormat, init_tracing_with};
