//! Response cache subsystem.
//!
//! # Data Flow
//! ```text
//! Request resolver:
//!     → get(key) on every request (fast path)
//!     → set_with_expiry(key, value, ttl) after a primary success
//!
//! Liveness monitor:
//!     → ping() every check interval
//! ```
//!
//! # Design Decisions
//! - One trait seam (`ResponseCache`) so the resolver and the liveness
//!   monitor can be exercised against an in-memory store in tests
//! - A read fault is distinguishable from a miss in the signature
//!   (`Result<Option<_>>`); callers decide how to degrade
//! - Writes are best-effort; a failed write never fails the request

pub mod client;

pub use client::CacheError;
pub use client::RedisCache;
pub use client::ResponseCache;
