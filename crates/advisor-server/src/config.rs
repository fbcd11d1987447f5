//! Server configuration loaded from the environment

use advisor_utils::Environment;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not a valid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Process-wide settings, immutable after startup
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    #[serde(skip)]
    pub google_api_key: Option<String>,
    #[serde(skip)]
    pub firecrawl_api_key: Option<String>,
    /// Override for the chat completions base URL
    pub llm_api_base: Option<String>,
    pub llm_model: Option<String>,
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            google_api_key: None,
            firecrawl_api_key: None,
            llm_api_base: None,
            llm_model: None,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load from `HOST`, `PORT`, `GOOGLE_API_KEY`,
    /// `FIRECRAWL_API_KEY`, `LLM_API_BASE`, `LLM_MODEL`, `SESSION_TTL_SECS`
    /// and `ADVISOR_ENV`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| non_empty(lookup(name));
        let mut builder = Self::builder();

        if let Some(env) = var(advisor_utils::environment::ENV_VAR) {
            let parsed = env.parse().map_err(|_| ConfigError::InvalidValue {
                name: "ADVISOR_ENV",
                value: env.clone(),
            })?;
            builder = builder.environment(parsed);
        }
        if let Some(host) = var("HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = var("PORT") {
            let parsed = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value: port.clone() })?;
            builder = builder.port(parsed);
        }
        if let Some(secs) = var("SESSION_TTL_SECS") {
            let parsed: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                name: "SESSION_TTL_SECS",
                value: secs.clone(),
            })?;
            builder = builder.session_ttl(Duration::from_secs(parsed));
        }

        builder
            .google_api_key(var("GOOGLE_API_KEY"))
            .firecrawl_api_key(var("FIRECRAWL_API_KEY"))
            .llm_api_base(var("LLM_API_BASE"))
            .llm_model(var("LLM_MODEL"))
            .build()
    }

    /// Both shopping credentials, if configured
    pub fn shopping_credentials(&self) -> Option<(&str, &str)> {
        Some((
            self.google_api_key.as_deref()?,
            self.firecrawl_api_key.as_deref()?,
        ))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_TTL_SECS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    environment: Option<Environment>,
    host: Option<String>,
    port: Option<u16>,
    google_api_key: Option<String>,
    firecrawl_api_key: Option<String>,
    llm_api_base: Option<String>,
    llm_model: Option<String>,
    session_ttl: Option<Duration>,
}

impl ServerConfigBuilder {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn google_api_key(mut self, key: Option<String>) -> Self {
        self.google_api_key = non_empty(key);
        self
    }

    pub fn firecrawl_api_key(mut self, key: Option<String>) -> Self {
        self.firecrawl_api_key = non_empty(key);
        self
    }

    pub fn llm_api_base(mut self, base: Option<String>) -> Self {
        self.llm_api_base = non_empty(base);
        self
    }

    pub fn llm_model(mut self, model: Option<String>) -> Self {
        self.llm_model = non_empty(model);
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }

    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = ServerConfig::default();
        let config = ServerConfig {
            environment: self.environment.unwrap_or(defaults.environment),
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            google_api_key: self.google_api_key,
            firecrawl_api_key: self.firecrawl_api_key,
            llm_api_base: self.llm_api_base,
            llm_model: self.llm_model,
            session_ttl: self.session_ttl.unwrap_or(defaults.session_ttl),
        };
        config.validate()?;
        Ok(config)
    }
}
