//! Error types for advisor-shop

use thiserror::Error;

/// Result type alias for advisor-shop
pub type Result<T> = std::result::Result<T, ShopError>;

/// Errors raised by the shopping flow
#[derive(Error, Debug)]
pub enum ShopError {
    /// A required form field was empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A field value is not one of the allowed options
    #[error("'{value}' is not a valid {field}")]
    InvalidChoice { field: &'static str, value: String },

    /// An API key needed by the agent is not configured
    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    /// The agent could not be constructed
    #[error(transparent)]
    Agent(#[from] advisor_core::Error),
}
