//! Upstream HTTP client subsystem.
//!
//! # Responsibilities
//! - Issue GET calls to the primary and fallback upstreams
//! - Bound every call with a fixed deadline
//! - Surface transport errors, timeouts, and bodies as explicit values
//!
//! # Design Decisions
//! - One shared hyper client; the connection pool is reused across
//!   requests and both upstreams
//! - The client knows nothing about the breaker or the cache; failure
//!   classification happens in the resolver

pub mod client;

pub use client::CallError;
pub use client::UpstreamClient;
pub use client::UpstreamResponse;
pub use client::CALL_TIMEOUT;
