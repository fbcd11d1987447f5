//! Stock market reports and chart data
//!
//! This crate turns market data into the markdown reports and Chart.js
//! configurations served by the stock dashboard:
//!
//! - Data fetching from Yahoo Finance behind the [`MarketDataProvider`] trait
//! - TTL caching of provider responses ([`CachedProvider`])
//! - Markdown renderers for prices, analyst ratings, company profiles, news
//!   and free-form multi-ticker analysis
//! - Price, volume and moving-average chart configurations
//!
//! # Example
//!
//! ```rust,ignore
//! use advisor_market::{CachedProvider, MarketConfig, MarketService, YahooFinanceClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MarketConfig::default();
//!     let yahoo = Arc::new(YahooFinanceClient::new(&config)?);
//!     let service = MarketService::new(Arc::new(CachedProvider::new(yahoo, &config)));
//!
//!     let report = service.stock_price("AAPL").await;
//!     println!("{}", report.markdown);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod chart;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod service;
pub mod stock_list;

pub use api::{CachedProvider, MarketDataProvider, YahooFinanceClient};
pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use model::{HistoryRange, InfoSnapshot, NewsItem, PriceBar, RecommendationTable};
pub use report::MarkdownReport;
pub use service::MarketService;
pub use stock_list::StockList;
