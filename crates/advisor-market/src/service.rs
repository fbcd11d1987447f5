//! Market operations behind the HTTP endpoints
//!
//! Markdown operations never fail: any provider error becomes a
//! [`MarkdownReport::error`]. Chart operations return `Result` so the caller
//! can answer with an error status.

use crate::api::MarketDataProvider;
use crate::chart;
use crate::error::{MarketError, Result};
use crate::model::{HistoryRange, PriceBar};
use crate::report::custom::{self, MarketOverview, TickerOutcome};
use crate::report::{self, MarkdownReport};
use crate::stock_list::StockList;
use chrono::Local;
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Index used for the market overview when a prompt names no tickers
pub const MARKET_INDEX: &str = "SPY";

#[derive(Clone)]
pub struct MarketService {
    provider: Arc<dyn MarketDataProvider>,
}

fn ticker_of(ticker: &str) -> Result<String> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(MarketError::InvalidSymbol(ticker.to_string()));
    }
    Ok(ticker.to_string())
}

fn contain(context: String, result: Result<String>) -> MarkdownReport {
    match result {
        Ok(markdown) => MarkdownReport::new(markdown),
        Err(e) => {
            warn!(error = %e, "{context}");
            MarkdownReport::error(format!("{context}: {e}"))
        }
    }
}

impl MarketService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    async fn history(&self, symbol: &str, range: HistoryRange) -> Result<Vec<PriceBar>> {
        let bars = self.provider.history(symbol, range).await?;
        if bars.is_empty() {
            return Err(MarketError::unavailable(symbol, "no price history"));
        }
        Ok(bars)
    }

    #[instrument(skip(self))]
    pub async fn stock_price(&self, ticker: &str) -> MarkdownReport {
        let result: Result<String> = async {
            let symbol = ticker_of(ticker)?;
            let bars = self.history(&symbol, HistoryRange::OneMonth).await?;
            let info = self.provider.info(&symbol).await?;
            Ok(report::price::render_price_report(&symbol, &bars, &info))
        }
        .await;
        contain(format!("Error retrieving stock data for {ticker}"), result)
    }

    #[instrument(skip(self))]
    pub async fn analyst_recommendations(&self, ticker: &str) -> MarkdownReport {
        let result: Result<String> = async {
            let symbol = ticker_of(ticker)?;
            let upper = symbol.to_uppercase();
            let company = match self.provider.info(&symbol).await {
                Ok(info) => info.short_name_or(&upper).to_string(),
                Err(e) => {
                    warn!(error = %e, "Company name lookup failed");
                    upper.clone()
                }
            };

            let markdown = match self.provider.recommendations(&symbol).await {
                Ok(table) => report::recommendations::render_recommendations(
                    &symbol,
                    &company,
                    Ok(table.as_ref()),
                ),
                Err(e) => {
                    let reason = e.to_string();
                    report::recommendations::render_recommendations(
                        &symbol,
                        &company,
                        Err(&reason),
                    )
                }
            };
            Ok(markdown)
        }
        .await;
        contain(
            format!("Error retrieving analyst recommendations for {ticker}"),
            result,
        )
    }

    #[instrument(skip(self))]
    pub async fn company_info(&self, ticker: &str) -> MarkdownReport {
        let result: Result<String> = async {
            let symbol = ticker_of(ticker)?;
            let info = self.provider.info(&symbol).await?;
            Ok(report::company::render_company_info(&symbol, &info))
        }
        .await;
        contain(
            format!("Error retrieving company information for {ticker}"),
            result,
        )
    }

    #[instrument(skip(self))]
    pub async fn company_news(&self, ticker: &str) -> MarkdownReport {
        let result: Result<String> = async {
            let symbol = ticker_of(ticker)?;
            let upper = symbol.to_uppercase();
            let info = self.provider.info(&symbol).await?;
            let items = self.provider.news(&symbol).await.unwrap_or_else(|e| {
                warn!(error = %e, "News search failed, using sample headlines");
                Vec::new()
            });
            Ok(report::news::render_news(
                info.short_name_or(&upper),
                &items,
                Local::now().date_naive(),
            ))
        }
        .await;
        contain(format!("Error retrieving company news for {ticker}"), result)
    }

    async fn ticker_outcome(&self, symbol: String) -> (String, TickerOutcome) {
        let outcome = match self.provider.info(&symbol).await {
            Err(e) => TickerOutcome::Error(e.to_string()),
            Ok(info) if info.is_empty() => TickerOutcome::NoInfo,
            Ok(info) => match self.provider.history(&symbol, HistoryRange::SixMonths).await {
                Err(e) => TickerOutcome::Error(e.to_string()),
                Ok(bars) if bars.is_empty() => TickerOutcome::NoHistory,
                Ok(bars) => TickerOutcome::Valid { info, bars },
            },
        };
        (symbol, outcome)
    }

    async fn market_overview(&self) -> MarketOverview {
        match self.provider.history(MARKET_INDEX, HistoryRange::OneMonth).await {
            Ok(bars) => custom::overview_from_bars(&bars),
            Err(e) => MarketOverview::Error(e.to_string()),
        }
    }

    /// Analyse up to three tickers named in `prompt`, or summarize the market
    #[instrument(skip(self))]
    pub async fn custom_analysis(&self, prompt: &str) -> MarkdownReport {
        let mentioned = custom::extract_tickers(prompt);
        info!(tickers = ?mentioned, "Running custom analysis");

        let markdown = if mentioned.is_empty() {
            custom::render_market_overview(prompt, &self.market_overview().await)
        } else {
            let lookups = custom::tickers_to_fetch(&mentioned)
                .into_iter()
                .map(|symbol| self.ticker_outcome(symbol));
            let outcomes = join_all(lookups).await;
            custom::render_ticker_analysis(prompt, &mentioned, &outcomes)
        };
        MarkdownReport::new(markdown)
    }

    pub fn stock_list(&self) -> StockList {
        StockList
    }

    async fn six_months(&self, ticker: &str) -> Result<(String, Vec<PriceBar>)> {
        let symbol = ticker_of(ticker)?;
        let bars = self.history(&symbol, HistoryRange::SixMonths).await?;
        Ok((symbol, bars))
    }

    #[instrument(skip(self))]
    pub async fn price_trends(&self, ticker: &str) -> Result<Value> {
        let (symbol, bars) = self.six_months(ticker).await?;
        Ok(chart::price_trend_config(&symbol, &bars))
    }

    #[instrument(skip(self))]
    pub async fn volume_analysis(&self, ticker: &str) -> Result<Value> {
        let (symbol, bars) = self.six_months(ticker).await?;
        Ok(chart::volume_config(&symbol, &bars))
    }

    #[instrument(skip(self))]
    pub async fn technical_indicators(&self, ticker: &str) -> Result<Value> {
        let (symbol, bars) = self.six_months(ticker).await?;
        chart::technical_config(&symbol, &bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataProvider;
    use crate::model::{InfoSnapshot, RecommendationTable};
    use crate::report::price::tests::bars;
    use mockall::predicate::eq;
    use serde_json::json;

    fn snapshot(value: Value) -> InfoSnapshot {
        serde_json::from_value(value).unwrap()
    }

    fn service(mock: MockMarketDataProvider) -> MarketService {
        MarketService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_stock_price_short_history() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history()
            .with(eq("AAPL"), eq(HistoryRange::OneMonth))
            .returning(|_, _| Ok(bars(&[100.0, 110.0, 121.0])));
        mock.expect_info()
            .returning(|_| Ok(snapshot(json!({"currentPrice": 121.0}))));

        let report = service(mock).stock_price("AAPL").await;
        assert_eq!(report.content, report.markdown);
        assert!(report.markdown.contains("# Stock Price Analysis for AAPL"));
        assert_eq!(report.markdown.matches("| 2024-05-").count(), 3);
        assert!(report.markdown.contains("- Price Change: 21.00%"));
    }

    #[tokio::test]
    async fn test_stock_price_zero_first_close() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history().returning(|_, _| Ok(bars(&[0.0, 5.0])));
        mock.expect_info().returning(|_| Ok(InfoSnapshot::default()));

        let report = service(mock).stock_price("X").await;
        assert!(report.markdown.contains("- Price Change: N/A"));
        assert!(report.markdown.contains("## Current Price: N/A"));
    }

    #[tokio::test]
    async fn test_stock_price_upstream_error() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history()
            .returning(|_, _| Err(MarketError::ApiError("rate limited".into())));

        let report = service(mock).stock_price("AAPL").await;
        assert_eq!(
            report.content,
            "Error retrieving stock data for AAPL: API error: rate limited"
        );
        assert_eq!(report.markdown, format!("## Error\n{}", report.content));
    }

    #[tokio::test]
    async fn test_empty_ticker_is_contained() {
        let report = service(MockMarketDataProvider::new()).company_info("  ").await;
        assert!(report.content.starts_with("Error retrieving company information for"));
        assert!(report.content.contains("Invalid symbol"));
    }

    #[tokio::test]
    async fn test_recommendations_failure_explained() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_info()
            .returning(|_| Ok(snapshot(json!({"shortName": "Apple Inc."}))));
        mock.expect_recommendations()
            .returning(|_| Err(MarketError::ApiError("401".into())));

        let report = service(mock).analyst_recommendations("aapl").await;
        assert!(report.markdown.starts_with("# Analyst Recommendations for AAPL"));
        assert!(report.markdown.contains("Apple Inc."));
        assert!(report.markdown.contains("API error: 401"));
    }

    #[tokio::test]
    async fn test_recommendations_name_fallback() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_info()
            .returning(|_| Err(MarketError::ApiError("down".into())));
        mock.expect_recommendations()
            .returning(|_| Ok(Some(RecommendationTable::default())));

        let report = service(mock).analyst_recommendations("msft").await;
        assert!(report.markdown.contains("available for MSFT"));
    }

    #[tokio::test]
    async fn test_news_falls_back_to_samples() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_info()
            .returning(|_| Ok(snapshot(json!({"shortName": "Tesla, Inc."}))));
        mock.expect_news()
            .returning(|_| Err(MarketError::ApiError("down".into())));

        let report = service(mock).company_news("TSLA").await;
        assert!(report.markdown.starts_with("# Latest News for Tesla, Inc."));
        assert!(report.markdown.contains("sample news data"));
    }

    #[tokio::test]
    async fn test_custom_analysis_per_ticker_outcomes() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_info().returning(|symbol| match symbol {
            "AAPL" | "MSFT" => Ok(snapshot(json!({"shortName": symbol, "currentPrice": 10.0}))),
            "NOPE" => Ok(InfoSnapshot::default()),
            _ => Err(MarketError::ApiError("boom".into())),
        });
        mock.expect_history()
            .with(mockall::predicate::always(), eq(HistoryRange::SixMonths))
            .returning(|_, _| Ok(bars(&[5.0, 10.0])));

        let report = service(mock).custom_analysis("Compare AAPL MSFT NOPE TSLA").await;
        let md = &report.markdown;
        assert!(md.contains("## Analysis for AAPL, MSFT, NOPE, TSLA"));
        assert!(md.contains("### NOPE: No data available"));
        assert!(!md.contains("### TSLA"));
        assert!(md.contains("- 6-Month Price Change: 100.00%"));
        assert!(md.contains("## Comparative Analysis"));
    }

    #[tokio::test]
    async fn test_custom_analysis_without_tickers() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history()
            .with(eq(MARKET_INDEX), eq(HistoryRange::OneMonth))
            .times(1)
            .returning(|_, _| Ok(bars(&[500.0, 525.0])));

        let report = service(mock).custom_analysis("how is the market?").await;
        assert!(report.markdown.contains("- Current Level: $525.00"));
        assert!(report.markdown.contains("- 1-Month Change: 5.00%"));
    }

    #[tokio::test]
    async fn test_chart_errors_propagate() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history().returning(|_, _| Ok(Vec::new()));

        let svc = service(mock);
        assert!(matches!(
            svc.price_trends("ZZZZ").await,
            Err(MarketError::DataUnavailable { .. })
        ));
        assert!(matches!(
            svc.technical_indicators("").await,
            Err(MarketError::InvalidSymbol(_))
        ));
    }

    #[tokio::test]
    async fn test_volume_chart() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_history().returning(|_, _| Ok(bars(&[1.0, 2.0])));

        let config = tokio_test::assert_ok!(service(mock).volume_analysis("AAPL").await);
        assert_eq!(config["data"]["datasets"][0]["label"], "AAPL Volume");
    }
}
