//! Configuration loading from the environment.

use std::env;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {source}")]
    InvalidInt {
        var: &'static str,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid value for {var}: {source}")]
    InvalidBool {
        var: &'static str,
        #[source]
        source: std::str::ParseBoolError,
    },

    #[error("invalid URL for {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

impl GatewayConfig {
    /// Build the configuration from environment variables, falling back
    /// to defaults for anything unset.
    ///
    /// Recognized variables: `BIND_ADDRESS`, `PRIMARY_URL`,
    /// `FALLBACK_URL`, `REDIS_HOST`, `REDIS_PORT`, `LOG_LEVEL`,
    /// `METRICS_ENABLED`, `METRICS_ADDRESS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = GatewayConfig::default();

        if let Ok(v) = env::var("BIND_ADDRESS") {
            config.listener.bind_address = v;
        }
        if let Ok(v) = env::var("PRIMARY_URL") {
            config.upstreams.primary_url = v;
        }
        if let Ok(v) = env::var("FALLBACK_URL") {
            config.upstreams.fallback_url = v;
        }
        if let Ok(v) = env::var("REDIS_HOST") {
            config.cache.host = v;
        }
        if let Ok(v) = env::var("REDIS_PORT") {
            config.cache.port = v
                .parse()
                .map_err(|source| ConfigError::InvalidInt { var: "REDIS_PORT", source })?;
        }
        if let Ok(v) = env::var("LOG_LEVEL") {
            config.observability.log_level = v;
        }
        if let Ok(v) = env::var("METRICS_ENABLED") {
            config.observability.metrics_enabled = v
                .parse()
                .map_err(|source| ConfigError::InvalidBool { var: "METRICS_ENABLED", source })?;
        }
        if let Ok(v) = env::var("METRICS_ADDRESS") {
            config.observability.metrics_address = v;
        }

        validate_url(&config.upstreams.primary_url, "PRIMARY_URL")?;
        validate_url(&config.upstreams.fallback_url, "FALLBACK_URL")?;

        Ok(config)
    }
}

fn validate_url(raw: &str, var: &'static str) -> Result<(), ConfigError> {
    Url::parse(raw)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidUrl { var, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-global, so everything lives in a
    // single test to avoid interference between parallel test threads.
    #[test]
    fn test_from_env_overrides_and_defaults() {
        env::set_var("PRIMARY_URL", "http://primary.test:9001");
        env::set_var("FALLBACK_URL", "http://fallback.test:9002");
        env::set_var("REDIS_HOST", "cache.test");
        env::set_var("REDIS_PORT", "6380");

        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.upstreams.primary_url, "http://primary.test:9001");
        assert_eq!(config.upstreams.fallback_url, "http://fallback.test:9002");
        assert_eq!(config.cache.host, "cache.test");
        assert_eq!(config.cache.port, 6380);
        assert_eq!(config.cache.url(), "redis://cache.test:6380");
        // Unset vars keep their defaults.
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.observability.metrics_enabled);

        env::set_var("REDIS_PORT", "not-a-port");
        assert!(matches!(
            GatewayConfig::from_env(),
            Err(ConfigError::InvalidInt { var: "REDIS_PORT", .. })
        ));

        env::set_var("REDIS_PORT", "6379");
        env::set_var("PRIMARY_URL", "not a url");
        assert!(matches!(
            GatewayConfig::from_env(),
            Err(ConfigError::InvalidUrl { var: "PRIMARY_URL", .. })
        ));

        env::remove_var("PRIMARY_URL");
        env::remove_var("FALLBACK_URL");
        env::remove_var("REDIS_HOST");
        env::remove_var("REDIS_PORT");
    }
}
