//! Caching decorator for any market data provider

use crate::api::MarketDataProvider;
use crate::cache::{CacheKey, MarketCache};
use crate::config::MarketConfig;
use crate::error::Result;
use crate::model::{HistoryRange, InfoSnapshot, NewsItem, PriceBar, RecommendationTable};
use async_trait::async_trait;
use std::sync::Arc;

/// Wraps a provider with per-kind TTL caches
///
/// History uses the short TTL, metadata and ratings the fundamental TTL,
/// headlines the news TTL. Failures pass through uncached.
pub struct CachedProvider {
    inner: Arc<dyn MarketDataProvider>,
    history: MarketCache<CacheKey, Vec<PriceBar>>,
    info: MarketCache<CacheKey, InfoSnapshot>,
    recommendations: MarketCache<CacheKey, Option<RecommendationTable>>,
    news: MarketCache<CacheKey, Vec<NewsItem>>,
}

impl CachedProvider {
    pub fn new(inner: Arc<dyn MarketDataProvider>, config: &MarketConfig) -> Self {
        Self {
            inner,
            history: MarketCache::new(config.cache_ttl_history),
            info: MarketCache::new(config.cache_ttl_fundamental),
            recommendations: MarketCache::new(config.cache_ttl_fundamental),
            news: MarketCache::new(config.cache_ttl_news),
        }
    }
}

#[async_trait]
impl MarketDataProvider for CachedProvider {
    async fn history(&self, symbol: &str, range: HistoryRange) -> Result<Vec<PriceBar>> {
        let key = CacheKey::new(symbol, format!("history:{}", range.as_str()));
        self.history
            .get_or_fetch(key, || self.inner.history(symbol, range))
            .await
    }

    async fn info(&self, symbol: &str) -> Result<InfoSnapshot> {
        self.info
            .get_or_fetch(CacheKey::new(symbol, "info"), || self.inner.info(symbol))
            .await
    }

    async fn recommendations(&self, symbol: &str) -> Result<Option<RecommendationTable>> {
        self.recommendations
            .get_or_fetch(CacheKey::new(symbol, "recommendations"), || {
                self.inner.recommendations(symbol)
            })
            .await
    }

    async fn news(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        self.news
            .get_or_fetch(CacheKey::new(symbol, "news"), || self.inner.news(symbol))
            .await
    }
}
