//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits so the config can also be
//! logged or dumped as a document.

use serde::{Deserialize, Serialize};

/// Root configuration for the failover gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Primary and fallback upstream endpoints.
    pub upstreams: UpstreamConfig,

    /// Cache store (redis) connection settings.
    pub cache: CacheStoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Primary upstream URL, called on a cache miss.
    pub primary_url: String,

    /// Fallback upstream URL, called when the primary is failing or
    /// its circuit breaker is open.
    pub fallback_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            primary_url: "http://127.0.0.1:8001".to_string(),
            fallback_url: "http://127.0.0.1:8002".to_string(),
        }
    }
}

/// Cache store (redis) connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheStoreConfig {
    /// Cache store host.
    pub host: String,

    /// Cache store port.
    pub port: u16,
}

impl CacheStoreConfig {
    /// Connection URL for the redis client.
    pub fn url(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }
}

impl Default for CacheStoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
