//! Deployment environment selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable that selects the deployment environment
pub const ENV_VAR: &str = "ADVISOR_ENV";

/// Deployment environment the server runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development, verbose logs
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Default tracing filter for this environment
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Self::Development => "info,advisor_server=debug,advisor_market=debug,advisor_shop=debug",
            Self::Production => "info",
            Self::Testing => "warn",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "default" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "testing" | "test" => Ok(Self::Testing),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Testing".parse::<Environment>().unwrap(), Environment::Testing);
        assert_eq!("default".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_log_filter_per_environment() {
        assert!(Environment::Development.default_log_filter().contains("advisor_server=debug"));
        assert_eq!(Environment::Production.default_log_filter(), "info");
        assert_eq!(Environment::Testing.default_log_filter(), "warn");
    }

    #[test]
    fn test_display_round_trips() {
        for env in [Environment::Development, Environment::Production, Environment::Testing] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
    }
}
