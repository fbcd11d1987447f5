//! Market data provider trait

use crate::error::Result;
use crate::model::{HistoryRange, InfoSnapshot, NewsItem, PriceBar, RecommendationTable};
use async_trait::async_trait;

/// Source of prices, company metadata, analyst ratings and headlines
///
/// Reports and charts only talk to this trait, so tests substitute a mock
/// and the server can layer caching on top.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for the window, oldest first
    async fn history(&self, symbol: &str, range: HistoryRange) -> Result<Vec<PriceBar>>;

    /// Company metadata snapshot
    async fn info(&self, symbol: &str) -> Result<InfoSnapshot>;

    /// Analyst rating changes; `None` when the provider has none
    async fn recommendations(&self, symbol: &str) -> Result<Option<RecommendationTable>>;

    /// Recent headlines for the symbol
    async fn news(&self, symbol: &str) -> Result<Vec<NewsItem>>;
}
