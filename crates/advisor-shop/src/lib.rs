//! Shopping assistant for advisor-rs
//!
//! - [`catalog`]: categories, brands, budget buckets and preference tags
//! - [`selection`]: the validated search form, [`SearchSelection`]
//! - [`query`]: [`format_query`], selection to natural-language query
//! - [`agent`]: [`ShoppingAgent`], the LLM + web tools recommender

pub mod agent;
pub mod catalog;
pub mod error;
pub mod query;
pub mod selection;

pub use agent::{ShoppingAgent, ShoppingAgentConfig};
pub use error::{Result, ShopError};
pub use query::format_query;
pub use selection::{SearchForm, SearchSelection};
