//! Shared application state

use crate::config::ServerConfig;
use crate::session::SessionStore;
use crate::templates::{Pages, TemplateError};
use advisor_market::{CachedProvider, MarketConfig, MarketService, YahooFinanceClient};
use advisor_shop::{ShoppingAgent, ShoppingAgentConfig};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub market: MarketService,
    /// `None` when the shopping credentials are not configured
    pub shopper: Option<Arc<ShoppingAgent>>,
    pub sessions: SessionStore,
    pub pages: Pages,
}

impl AppState {
    pub fn new(
        session_ttl: Duration,
        market: MarketService,
        shopper: Option<Arc<ShoppingAgent>>,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            sessions: SessionStore::new(session_ttl),
            pages: Pages::load()?,
            market,
            shopper,
        })
    }

    /// Wire the Yahoo client and, when credentials are present, the shopping agent
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let market_config = MarketConfig::default();
        let yahoo = YahooFinanceClient::new(&market_config)
            .context("failed to build the market data client")?;
        let market = MarketService::new(Arc::new(CachedProvider::new(
            Arc::new(yahoo),
            &market_config,
        )));

        let shopper = match config.shopping_credentials() {
            Some((google, firecrawl)) => {
                let mut agent_config = ShoppingAgentConfig::new(google, firecrawl)
                    .with_api_base(config.llm_api_base.clone());
                if let Some(model) = &config.llm_model {
                    agent_config = agent_config.with_model(model);
                }
                let agent =
                    ShoppingAgent::new(agent_config).context("failed to build the shopping agent")?;
                info!("Shopping agent ready");
                Some(Arc::new(agent))
            }
            None => {
                warn!("GOOGLE_API_KEY or FIRECRAWL_API_KEY not set; shopping is disabled");
                None
            }
        };

        Ok(Self::new(config.session_ttl, market, shopper)?)
    }
}
