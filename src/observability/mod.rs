//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, request histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The two business counters (cache hits, breaker activations) are
//!   monotonic for the life of the process; only a restart resets them
//! - Metric updates are cheap atomic increments
//! - Log level comes from config, overridable via RUST_LOG

pub mod logging;
pub mod metrics;
