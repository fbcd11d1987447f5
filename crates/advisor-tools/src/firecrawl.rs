//! Firecrawl web tools: scrape a page to markdown, search the web
//!
//! See: https://docs.firecrawl.dev/api-reference/introduction

use crate::Tool;
use advisor_core::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_API_BASE: &str = "https://api.firecrawl.dev/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SEARCH_LIMIT: u64 = 5;
const MAX_SEARCH_LIMIT: u64 = 10;

/// Thin HTTP client for the Firecrawl v1 API
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl FirecrawlClient {
    /// Create a client with the default endpoint and timeout
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom endpoint and request timeout
    pub fn with_options(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::InitializationFailed(format!("Firecrawl client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Scrape a single page and return its markdown rendering
    #[instrument(skip(self))]
    pub async fn scrape(&self, url: &str) -> Result<Value> {
        let body = self
            .post("scrape", &json!({ "url": url, "formats": ["markdown"] }))
            .await?;

        let data = body.get("data").cloned().unwrap_or(Value::Null);
        Ok(json!({
            "url": url,
            "markdown": data.get("markdown").cloned().unwrap_or(Value::Null),
            "metadata": data.get("metadata").cloned().unwrap_or(Value::Null),
        }))
    }

    /// Search the web and return the result list
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u64) -> Result<Value> {
        let body = self
            .post("search", &json!({ "query": query, "limit": limit }))
            .await?;

        Ok(body.get("data").cloned().unwrap_or_else(|| json!([])))
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value> {
        let failed = |reason: String| Error::ToolFailed {
            name: format!("firecrawl/{endpoint}"),
            reason,
        };

        let response = self
            .client
            .post(format!("{}/{endpoint}", self.api_base))
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| failed(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(failed(format!("HTTP {status}: {text}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| failed(format!("invalid response: {e}")))?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(failed(message.to_string()));
        }

        debug!(endpoint, "Firecrawl request succeeded");
        Ok(body)
    }
}

/// Required string parameter from a tool call
fn string_param<'a>(tool: &str, params: &'a Value, key: &str) -> Result<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::ToolFailed {
            name: tool.to_string(),
            reason: format!("missing required parameter '{key}'"),
        })
}

/// `scrape_website` tool
pub struct ScrapeWebsiteTool {
    client: Arc<FirecrawlClient>,
}

impl ScrapeWebsiteTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ScrapeWebsiteTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let url = string_param(self.name(), &params, "url")?;
        self.client.scrape(url).await
    }

    fn name(&self) -> &str {
        "scrape_website"
    }

    fn description(&self) -> &str {
        "Scrape a web page (for example a product listing) and return its content as markdown."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": { "type": "string", "description": "Absolute URL of the page to scrape" }
            },
            "required": ["url"]
        })
    }
}

/// `search_web` tool
pub struct SearchWebTool {
    client: Arc<FirecrawlClient>,
}

impl SearchWebTool {
    pub fn new(client: Arc<FirecrawlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchWebTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let query = string_param(self.name(), &params, "query")?;
        let limit = params
            .get("limit")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);
        self.client.search(query, limit).await
    }

    fn name(&self) -> &str {
        "search_web"
    }

    fn description(&self) -> &str {
        "Search the web for products or pages matching a query. Returns titles, URLs and descriptions."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query" },
                "limit": { "type": "integer", "description": "Maximum number of results (1-10)" }
            },
            "required": ["query"]
        })
    }
}
