//! Caching layer for market data to reduce API calls

use cached::{Cached, TimedCache};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for market data requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Ticker symbol
    pub symbol: String,
    /// Operation, e.g. `history:6mo`
    pub endpoint: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(symbol: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Thread-safe TTL cache, cheap to clone
pub struct MarketCache<K, V> {
    cache: Arc<RwLock<TimedCache<K, V>>>,
}

impl<K, V> MarketCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a live value; expired entries are evicted on access
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: K, value: V) {
        let mut cache = self.cache.write().await;
        cache.flush();
        let _ = cache.cache_set(key, value);
    }

    /// Get or fetch a value using the provided fetcher function
    ///
    /// Errors are returned to the caller and never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(?key, "Cache hit");
            return Ok(value);
        }

        tracing::debug!(?key, "Cache miss");
        let value = fetcher().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Number of entries, including expired ones not yet evicted
    #[cfg(test)]
    async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }
}

impl<K, V> Clone for MarketCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(symbol: &str) -> CacheKey {
        CacheKey::new(symbol, "history:1mo")
    }

    #[tokio::test]
    async fn test_cache_insert_and_get() {
        let cache = MarketCache::new(Duration::from_secs(60));
        cache.insert(key("AAPL"), 150.0_f64).await;
        assert_eq!(cache.get(&key("AAPL")).await, Some(150.0));
        assert_eq!(cache.get(&key("MSFT")).await, None);
    }

    #[tokio::test]
    async fn test_cache_get_or_fetch() {
        let cache = MarketCache::new(Duration::from_secs(60));

        let mut call_count = 0;
        let result = cache
            .get_or_fetch(key("AAPL"), || {
                call_count += 1;
                async { Ok::<_, String>(1_u32) }
            })
            .await
            .unwrap();
        assert_eq!(result, 1);

        let result = cache
            .get_or_fetch(key("AAPL"), || {
                call_count += 1;
                async { Ok::<_, String>(2_u32) }
            })
            .await
            .unwrap();
        assert_eq!(result, 1);
        assert_eq!(call_count, 1);
    }

    #[tokio::test]
    async fn test_errors_not_cached() {
        let cache: MarketCache<CacheKey, u32> = MarketCache::new(Duration::from_secs(60));
        let result = cache
            .get_or_fetch(key("ZZZZ"), || async { Err::<u32, _>("boom") })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = MarketCache::new(Duration::from_secs(1));
        cache.insert(key("AAPL"), 1_u8).await;
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(cache.get(&key("AAPL")).await, None);
    }

    #[tokio::test]
    async fn test_len_counts_keys() {
        let cache = MarketCache::new(Duration::from_secs(60));
        for i in 0..3_u8 {
            cache.insert(key(&format!("STOCK{i}")), i).await;
        }
        cache.insert(key("STOCK1"), 9).await;
        assert_eq!(cache.len().await, 3);
    }
}
