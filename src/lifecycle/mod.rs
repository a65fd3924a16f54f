//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init observability → Connect cache → Start tasks
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast to server and liveness monitor → exit
//! ```
//!
//! # Design Decisions
//! - One broadcast channel; every long-running task subscribes
//! - The liveness monitor may also end the process on its own, by
//!   design (fail-fast supervision, see the health subsystem)

pub mod shutdown;

pub use shutdown::Shutdown;
