//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to primary upstream:
//!     → circuit_breaker.rs check() (fail fast while open)
//!     → upstream call with its own deadline
//!     → on_success()/on_failure() feeds the state machine
//! ```
//!
//! # Design Decisions
//! - Single breaker instance guarding the one primary call; shared by
//!   all request handlers behind an Arc
//! - No retry of the same upstream within a request; one failure is
//!   immediately classified and acted upon
//! - A response status of 500-599 counts as a breaker failure; 4xx and
//!   everything else counts as success

pub mod circuit_breaker;

pub use circuit_breaker::BreakerOpen;
pub use circuit_breaker::BreakerState;
pub use circuit_breaker::CircuitBreaker;
