//! Configuration for market data operations

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL for Yahoo's JSON endpoints (quote summary, search)
pub const DEFAULT_YAHOO_API_BASE: &str = "https://query2.finance.yahoo.com";

/// Configuration for the market data client and cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Cache TTL for price history
    pub cache_ttl_history: Duration,

    /// Cache TTL for company metadata and analyst ratings
    pub cache_ttl_fundamental: Duration,

    /// Cache TTL for news headlines
    pub cache_ttl_news: Duration,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Outbound requests per minute
    pub rate_limit_per_minute: u32,

    /// Base URL for the quote summary and search endpoints
    pub yahoo_api_base: String,

    /// Number of headlines requested for company news
    pub news_count: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            cache_ttl_history: Duration::from_secs(60),
            cache_ttl_fundamental: Duration::from_secs(3600),
            cache_ttl_news: Duration::from_secs(300),
            request_timeout: Duration::from_secs(30),
            rate_limit_per_minute: 60,
            yahoo_api_base: DEFAULT_YAHOO_API_BASE.to_string(),
            news_count: 5,
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_per_minute == 0 {
            return Err(MarketError::ConfigError(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(MarketError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if !self.yahoo_api_base.starts_with("http") {
            return Err(MarketError::ConfigError(format!(
                "yahoo_api_base is not an http(s) URL: {}",
                self.yahoo_api_base
            )));
        }

        Ok(())
    }
}

/// Builder for MarketConfig
#[derive(Debug, Default)]
pub struct MarketConfigBuilder {
    cache_ttl_history: Option<Duration>,
    cache_ttl_fundamental: Option<Duration>,
    cache_ttl_news: Option<Duration>,
    request_timeout: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
    yahoo_api_base: Option<String>,
    news_count: Option<usize>,
}

impl MarketConfigBuilder {
    /// Set cache TTL for price history
    pub fn cache_ttl_history(mut self, duration: Duration) -> Self {
        self.cache_ttl_history = Some(duration);
        self
    }

    /// Set cache TTL for fundamental data
    pub fn cache_ttl_fundamental(mut self, duration: Duration) -> Self {
        self.cache_ttl_fundamental = Some(duration);
        self
    }

    /// Set cache TTL for news data
    pub fn cache_ttl_news(mut self, duration: Duration) -> Self {
        self.cache_ttl_news = Some(duration);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the outbound rate limit
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set the Yahoo JSON API base URL
    pub fn yahoo_api_base(mut self, base: impl Into<String>) -> Self {
        self.yahoo_api_base = Some(base.into().trim_end_matches('/').to_string());
        self
    }

    /// Set the number of news headlines
    pub fn news_count(mut self, count: usize) -> Self {
        self.news_count = Some(count);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            cache_ttl_history: self.cache_ttl_history.unwrap_or(defaults.cache_ttl_history),
            cache_ttl_fundamental: self
                .cache_ttl_fundamental
                .unwrap_or(defaults.cache_ttl_fundamental),
            cache_ttl_news: self.cache_ttl_news.unwrap_or(defaults.cache_ttl_news),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            yahoo_api_base: self.yahoo_api_base.unwrap_or(defaults.yahoo_api_base),
            news_count: self.news_count.unwrap_or(defaults.news_count),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MarketConfig::default();
        assert_eq!(config.rate_limit_per_minute, 60);
        assert_eq!(config.yahoo_api_base, DEFAULT_YAHOO_API_BASE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = MarketConfig::builder()
            .request_timeout(Duration::from_secs(5))
            .yahoo_api_base("http://localhost:8080/")
            .news_count(3)
            .build()
            .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.yahoo_api_base, "http://localhost:8080");
        assert_eq!(config.news_count, 3);
    }

    #[test]
    fn test_validation_rejects_zero_rate() {
        let result = MarketConfig::builder().rate_limit_per_minute(0).build();
        assert!(matches!(result, Err(MarketError::ConfigError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_base() {
        let config = MarketConfig {
            yahoo_api_base: "query2.finance.yahoo.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
