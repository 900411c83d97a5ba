use config::{Config, ConfigError, Environment, File};
use log::warn;
use std::collections::HashMap;

const DEFAULT_USER_AGENT: &str = concat!("cardex-rust/", env!("CARGO_PKG_VERSION"));

/// Configuration management for Cardex
pub struct CardexConfig {
    config: Config,
}

impl CardexConfig {
    /// Create a new configuration instance from the optional properties file
    /// and CARDEX_-prefixed environment variables
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("cardex.properties").required(false))
            .add_source(Environment::with_prefix("CARDEX"))
            .build()?;

        Ok(Self { config })
    }

    /// Get a string value from the configuration
    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.config.get_string(key)
    }
}

/// Construct the HTTP headers for Scryfall. The API requires an identifying
/// User-Agent; it can be overridden through cardex.properties or the
/// CARDEX_USER_AGENT environment variable.
pub fn build_http_header() -> HashMap<String, String> {
    let user_agent = match CardexConfig::new() {
        Ok(config) => config
            .get_string("user_agent")
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        Err(_) => {
            warn!("Failed to load configuration. Using default User-Agent");
            DEFAULT_USER_AGENT.to_string()
        }
    };

    let mut headers = HashMap::new();
    headers.insert("User-Agent".to_string(), user_agent);
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_header_defaults() {
        let headers = build_http_header();

        assert!(headers
            .get("User-Agent")
            .map(|ua| !ua.is_empty())
            .unwrap_or(false));
        assert_eq!(
            headers.get("Accept"),
            Some(&"application/json".to_string())
        );
    }
}
