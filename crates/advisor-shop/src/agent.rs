//! The shopping agent: an LLM with Firecrawl web tools

use crate::error::{Result, ShopError};
use advisor_core::{Agent, normalize};
use advisor_llm::providers::{OpenAIConfig, OpenAIProvider};
use advisor_runtime::{AgentExecutor, ToolAgent, executor::DEFAULT_MODEL};
use advisor_tools::{FirecrawlClient, ScrapeWebsiteTool, SearchWebTool, ToolRegistry};
use std::sync::Arc;
use tracing::{info, instrument, warn};

const AGENT_NAME: &str = "shopping partner";

const INSTRUCTIONS: [&str; 7] = [
    "You are a product recommender agent specializing in finding products that match user preferences.",
    "Prioritize finding products that satisfy as many user requirements as possible, but ensure a minimum match of 50%.",
    "Search for products only from authentic and trusted e-commerce websites such as Google Shopping, Amazon, Flipkart, Myntra, Meesho, Nike, and other reputable platforms.",
    "Verify that each product recommendation is in stock and available for purchase.",
    "Avoid suggesting counterfeit or unverified products.",
    "Clearly mention the key attributes of each product (e.g., price, brand, features) in the response.",
    "Format the recommendations neatly and ensure clarity for ease of user understanding.",
];

/// System prompt built from the agent instructions
pub fn system_prompt() -> String {
    INSTRUCTIONS
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for building a [`ShoppingAgent`]
#[derive(Debug, Clone)]
pub struct ShoppingAgentConfig {
    pub google_api_key: String,
    pub firecrawl_api_key: String,
    /// Override for the chat completions base URL
    pub llm_api_base: Option<String>,
    pub model: String,
}

impl ShoppingAgentConfig {
    pub fn new(google_api_key: impl Into<String>, firecrawl_api_key: impl Into<String>) -> Self {
        Self {
            google_api_key: google_api_key.into(),
            firecrawl_api_key: firecrawl_api_key.into(),
            llm_api_base: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        self.llm_api_base = api_base;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Recommends products for a natural-language query
pub struct ShoppingAgent {
    agent: Arc<dyn Agent>,
}

impl ShoppingAgent {
    /// Build the Gemini-backed agent with Firecrawl tools
    pub fn new(config: ShoppingAgentConfig) -> Result<Self> {
        if config.google_api_key.trim().is_empty() {
            return Err(ShopError::MissingCredential("GOOGLE_API_KEY"));
        }
        if config.firecrawl_api_key.trim().is_empty() {
            return Err(ShopError::MissingCredential("FIRECRAWL_API_KEY"));
        }

        let mut llm_config = OpenAIConfig::gemini(config.google_api_key);
        if let Some(base) = config.llm_api_base {
            llm_config = llm_config.with_api_base(base);
        }
        let provider = OpenAIProvider::with_config(llm_config).map_err(advisor_core::Error::from)?;

        let firecrawl = Arc::new(FirecrawlClient::new(config.firecrawl_api_key)?);
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(SearchWebTool::new(firecrawl.clone())));
        registry.register(Arc::new(ScrapeWebsiteTool::new(firecrawl)));

        let executor = AgentExecutor::builder()
            .provider(Arc::new(provider))
            .tool_registry(registry)
            .model(config.model)
            .system_prompt(system_prompt())
            .build()?;

        Ok(Self::from_agent(Arc::new(ToolAgent::new(executor, AGENT_NAME))))
    }

    /// Wrap an existing agent
    pub fn from_agent(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    /// Run the query and return displayable text; failures become an error line
    #[instrument(skip(self, query), fields(agent = self.agent.name()))]
    pub async fn get_recommendations(&self, query: &str) -> String {
        info!(query_length = query.len(), "Requesting recommendations");
        match self.agent.process(query.to_string()).await {
            Ok(response) => normalize(&response),
            Err(e) => {
                warn!(error = %e, "Recommendation request failed");
                format!("Error retrieving recommendations: {e}")
            }
        }
    }
}
