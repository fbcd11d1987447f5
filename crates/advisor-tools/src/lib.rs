//! Tool management and execution framework for advisor-rs
//!
//! Tools are the functions an LLM agent may call. The registry holds them by
//! name; [`firecrawl`] provides the web scrape and search tools the shopping
//! agent relies on.

pub mod firecrawl;
pub mod registry;
pub mod tool;

pub use firecrawl::{FirecrawlClient, ScrapeWebsiteTool, SearchWebTool};
pub use registry::ToolRegistry;
pub use tool::Tool;
