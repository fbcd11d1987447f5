//! Error types for advisor-core

use thiserror::Error;

/// Result type alias for advisor-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// A tool call could not be completed
    #[error("Tool '{name}' failed: {reason}")]
    ToolFailed { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ToolFailed {
            name: "scrape_website".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'scrape_website' failed: timeout");
        assert_eq!(
            Error::ProcessingFailed("boom".into()).to_string(),
            "Agent processing failed: boom"
        );
    }
}
