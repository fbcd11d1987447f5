//! Yahoo Finance API client
//!
//! Daily bars come through `yahoo_finance_api`. Company metadata and analyst
//! rating changes come from the `quoteSummary` JSON endpoint, which needs a
//! session cookie and crumb; headlines come from the search endpoint.

use crate::api::MarketDataProvider;
use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::model::{HistoryRange, InfoSnapshot, NewsItem, PriceBar, RecommendationTable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use reqwest::header::{COOKIE, SET_COOKIE};
use serde_json::{Map, Value, json};
use std::num::NonZeroU32;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};
use yahoo_finance_api as yahoo;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const SESSION_URL: &str = "https://fc.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const INFO_MODULES: &str =
    "price,summaryProfile,summaryDetail,financialData,defaultKeyStatistics";
const RECOMMENDATION_MODULES: &str = "upgradeDowngradeHistory";

/// Column order of the analyst rating table
pub const RECOMMENDATION_COLUMNS: [&str; 5] = ["Date", "Firm", "toGrade", "fromGrade", "Action"];

#[derive(Debug, Clone)]
struct YahooSession {
    cookie: String,
    crumb: String,
}

/// Yahoo Finance API client
pub struct YahooFinanceClient {
    http: Client,
    api_base: String,
    news_count: usize,
    rate_limiter: SharedRateLimiter,
    session: Mutex<Option<YahooSession>>,
}

impl YahooFinanceClient {
    /// Create a client from configuration
    pub fn new(config: &MarketConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let per_minute = NonZeroU32::new(config.rate_limit_per_minute)
            .ok_or_else(|| MarketError::ConfigError("rate limit must be non-zero".to_string()))?;

        Ok(Self {
            http,
            api_base: config.yahoo_api_base.clone(),
            news_count: config.news_count,
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
            session: Mutex::new(None),
        })
    }

    /// Cookie + crumb pair required by `quoteSummary`, fetched once and reused
    async fn session(&self) -> Result<YahooSession> {
        let mut guard = self.session.lock().await;
        if let Some(session) = guard.as_ref() {
            return Ok(session.clone());
        }

        let response = self.http.get(SESSION_URL).send().await?;
        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .collect::<Vec<_>>()
            .join("; ");
        if cookie.is_empty() {
            return Err(MarketError::YahooFinanceError(
                "no session cookie returned".to_string(),
            ));
        }

        let crumb = self
            .http
            .get(format!("{}/v1/test/getcrumb", self.api_base))
            .header(COOKIE, &cookie)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        if crumb.is_empty() || crumb.contains('<') || crumb.contains(' ') {
            return Err(MarketError::YahooFinanceError(format!(
                "unexpected crumb response: {crumb}"
            )));
        }

        debug!("Established Yahoo session");
        let session = YahooSession { cookie, crumb };
        *guard = Some(session.clone());
        Ok(session)
    }

    /// First `quoteSummary` result for the requested modules
    async fn quote_summary(&self, symbol: &str, modules: &str) -> Result<Value> {
        let session = self.session().await?;
        self.rate_limiter.until_ready().await;

        let response = self
            .http
            .get(format!("{}/v10/finance/quoteSummary/{symbol}", self.api_base))
            .query(&[("modules", modules), ("crumb", session.crumb.as_str())])
            .header(COOKIE, &session.cookie)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 {
            // stale crumb; the next call negotiates a new one
            *self.session.lock().await = None;
        }
        let body: Value = response.json().await?;
        summary_result(symbol, &body)
            .inspect_err(|e| warn!(symbol, %status, error = %e, "quoteSummary request failed"))
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn history(&self, symbol: &str, range: HistoryRange) -> Result<Vec<PriceBar>> {
        self.rate_limiter.until_ready().await;

        let provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let end = Utc::now();
        let start = end - chrono::Duration::days(range.days());
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::YahooFinanceError(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let bars: Vec<PriceBar> = quotes
            .iter()
            .filter_map(|q| {
                let date = DateTime::from_timestamp(q.timestamp as i64, 0)?.date_naive();
                Some(PriceBar {
                    date,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume,
                })
            })
            .collect();

        debug!(symbol, bars = bars.len(), range = range.as_str(), "Fetched history");
        Ok(bars)
    }

    #[instrument(skip(self))]
    async fn info(&self, symbol: &str) -> Result<InfoSnapshot> {
        let result = self.quote_summary(symbol, INFO_MODULES).await?;
        Ok(flatten_summary(&result))
    }

    #[instrument(skip(self))]
    async fn recommendations(&self, symbol: &str) -> Result<Option<RecommendationTable>> {
        let result = self.quote_summary(symbol, RECOMMENDATION_MODULES).await?;
        Ok(parse_upgrade_history(&result))
    }

    #[instrument(skip(self))]
    async fn news(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        self.rate_limiter.until_ready().await;

        let body: Value = self
            .http
            .get(format!("{}/v1/finance/search", self.api_base))
            .query(&[
                ("q", symbol.to_string()),
                ("quotesCount", "0".to_string()),
                ("newsCount", self.news_count.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(parse_news(&body))
    }
}

/// Extract the single result object or the provider's error description
fn summary_result(symbol: &str, body: &Value) -> Result<Value> {
    let summary = &body["quoteSummary"];
    if let Some(description) = summary["error"]["description"].as_str() {
        return Err(MarketError::unavailable(symbol, description));
    }
    summary["result"]
        .get(0)
        .cloned()
        .ok_or_else(|| MarketError::unavailable(symbol, "empty quoteSummary result"))
}

/// Merge every module's fields into one map
///
/// Formatted numbers arrive as `{raw, fmt}`; the raw value is kept. Empty
/// objects mean "no value" and are dropped. The first module providing a
/// field wins.
pub fn flatten_summary(result: &Value) -> InfoSnapshot {
    let mut fields = Map::new();
    let Some(modules) = result.as_object() else {
        return InfoSnapshot::default();
    };

    for module in modules.values().filter_map(Value::as_object) {
        for (key, value) in module {
            if fields.contains_key(key) {
                continue;
            }
            let flat = match value {
                Value::Object(inner) if inner.contains_key("raw") => inner["raw"].clone(),
                Value::Object(inner) if inner.is_empty() => continue,
                Value::Null => continue,
                other => other.clone(),
            };
            fields.insert(key.clone(), flat);
        }
    }

    InfoSnapshot::new(fields)
}

/// Analyst rating changes, oldest first
pub fn parse_upgrade_history(result: &Value) -> Option<RecommendationTable> {
    let history = result["upgradeDowngradeHistory"]["history"].as_array()?;
    if history.is_empty() {
        return None;
    }

    let mut dated: Vec<(i64, Map<String, Value>)> = history
        .iter()
        .map(|entry| {
            let epoch = entry["epochGradeDate"].as_i64().unwrap_or_default();
            let date = DateTime::from_timestamp(epoch, 0)
                .map_or(Value::Null, |d| json!(d.format("%Y-%m-%d").to_string()));
            let mut row = Map::new();
            row.insert("Date".to_string(), date);
            row.insert("Firm".to_string(), entry["firm"].clone());
            row.insert("toGrade".to_string(), entry["toGrade"].clone());
            row.insert("fromGrade".to_string(), entry["fromGrade"].clone());
            row.insert("Action".to_string(), entry["action"].clone());
            (epoch, row)
        })
        .collect();
    dated.sort_by_key(|(epoch, _)| *epoch);

    Some(RecommendationTable {
        columns: RECOMMENDATION_COLUMNS.iter().map(ToString::to_string).collect(),
        rows: dated.into_iter().map(|(_, row)| row).collect(),
    })
}

pub fn parse_news(body: &Value) -> Vec<NewsItem> {
    body["news"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let title = item["title"].as_str()?.to_string();
                    Some(NewsItem {
                        title,
                        publisher: item["publisher"].as_str().map(ToString::to_string),
                        link: item["link"].as_str().map(ToString::to_string),
                        published: item["providerPublishTime"]
                            .as_i64()
                            .and_then(|ts| DateTime::from_timestamp(ts, 0)),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_summary_takes_raw_values() {
        let result = json!({
            "price": {
                "shortName": "Apple Inc.",
                "regularMarketPrice": {"raw": 187.5, "fmt": "187.50"},
                "marketCap": {"raw": 2.9e12, "fmt": "2.9T"}
            },
            "summaryDetail": {
                "trailingPE": {"raw": 29.1, "fmt": "29.10"},
                "dividendYield": {},
                "marketCap": {"raw": 1.0, "fmt": "1"}
            },
            "summaryProfile": {"sector": "Technology", "fullTimeEmployees": 164000}
        });

        let info = flatten_summary(&result);
        assert_eq!(info.str("shortName"), Some("Apple Inc."));
        assert_eq!(info.f64("regularMarketPrice"), Some(187.5));
        assert_eq!(info.f64("trailingPE"), Some(29.1));
        assert_eq!(info.get("dividendYield"), None);
        assert_eq!(info.u64("fullTimeEmployees"), Some(164_000));
    }

    #[test]
    fn test_summary_error_surfaces() {
        let body = json!({"quoteSummary": {"result": null, "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}}});
        let err = summary_result("ZZZZ", &body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Data not available for ZZZZ: Quote not found for symbol: ZZZZ"
        );
    }

    #[test]
    fn test_upgrade_history_sorted_oldest_first() {
        let result = json!({"upgradeDowngradeHistory": {"history": [
            {"epochGradeDate": 1_717_200_000, "firm": "Morgan Stanley", "toGrade": "Overweight", "fromGrade": "Overweight", "action": "main"},
            {"epochGradeDate": 1_704_067_200, "firm": "Barclays", "toGrade": "Underweight", "fromGrade": "", "action": "init"}
        ]}});

        let table = parse_upgrade_history(&result).unwrap();
        assert_eq!(table.columns, RECOMMENDATION_COLUMNS);
        assert_eq!(table.rows[0]["Firm"], "Barclays");
        assert_eq!(table.rows[0]["Date"], "2024-01-01");
        assert_eq!(table.rows[1]["toGrade"], "Overweight");
    }

    #[test]
    fn test_upgrade_history_absent() {
        assert!(parse_upgrade_history(&json!({})).is_none());
        assert!(parse_upgrade_history(&json!({"upgradeDowngradeHistory": {"history": []}})).is_none());
    }

    #[test]
    fn test_parse_news() {
        let body = json!({"news": [
            {"title": "Apple unveils new chips", "publisher": "Reuters", "link": "https://example.com/a", "providerPublishTime": 1_717_200_000},
            {"publisher": "no title"}
        ]});
        let news = parse_news(&body);
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].publisher.as_deref(), Some("Reuters"));
        assert!(news[0].published.is_some());
        assert!(parse_news(&json!({})).is_empty());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_live_history() {
        let client = YahooFinanceClient::new(&MarketConfig::default()).unwrap();
        let bars = client.history("AAPL", HistoryRange::OneMonth).await.unwrap();
        assert!(!bars.is_empty());
    }
}
