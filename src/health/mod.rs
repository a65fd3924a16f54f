//! Health subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness monitor (liveness.rs):
//!     Periodic timer (10s)
//!     → ping the cache store
//!     → ok: log and sleep
//!     → failure: log at error and terminate the process
//! ```
//!
//! # Design Decisions
//! - Fail-fast supervision: a silently degraded cache is judged worse
//!   than a hard, visible restart. The external process manager is
//!   expected to restart the gateway (restart-on-crash contract)
//! - The monitor runs on its own task and communicates with the rest
//!   of the process only through termination

pub mod liveness;

pub use liveness::LivenessMonitor;
pub use liveness::LIVENESS_INTERVAL;
