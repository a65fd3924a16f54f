//! Resilient single-endpoint failover gateway library.

pub mod cache;
pub mod config;
pub mod gateway;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
