//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read env vars, parse numerics/booleans)
//!     → schema.rs defaults for anything unset
//!     → GatewayConfig (validated, immutable)
//!     → shared with subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload for this service
//! - All fields have defaults so the gateway runs with zero env vars
//! - Upstream URLs are validated at load time, not per request
//! - Core policy values (cache TTL, breaker thresholds, call timeouts)
//!   are fixed constants owned by their subsystems, not configuration

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::CacheStoreConfig;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::UpstreamConfig;
