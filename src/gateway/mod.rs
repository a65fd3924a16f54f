//! Request resolution subsystem, the core of the gateway.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → cache read (fixed key)
//!         hit  → cached response (fast path, no upstream contact)
//!         miss → breaker admission → primary call (2s deadline)
//!             ok, status < 500 → cache write (best effort) → primary response
//!             5xx / transport / timeout / breaker open
//!                 → fallback call (2s deadline, unguarded)
//!                     ok  → fallback response (marked as such)
//!                     err → degraded "both failed" response
//! ```
//!
//! # Design Decisions
//! - Failure classification is an explicit outcome enum consumed by a
//!   small decision flow, not nested error-catching
//! - A cache read fault is logged and treated as a miss; the request
//!   still gets an answer while the liveness watchdog decides the
//!   process's fate
//! - The endpoint contract is always HTTP 200; failure is signaled in
//!   the JSON body, never via the status code

pub mod resolver;

pub use resolver::Resolution;
pub use resolver::Resolver;
pub use resolver::CACHE_KEY;
pub use resolver::CACHE_TTL;
