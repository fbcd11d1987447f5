//! Market data provider seam and the Yahoo Finance implementation

pub mod cached;
pub mod provider;
pub mod yahoo;

pub use cached::CachedProvider;
pub use provider::MarketDataProvider;
#[cfg(test)]
pub use provider::MockMarketDataProvider;
pub use yahoo::YahooFinanceClient;
