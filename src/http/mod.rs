//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout)
//!     → GET /api/v1/consul or /  → gateway resolver
//!     → GET /health              → static liveness answer
//!     → JSON response (always 200 on the resolver endpoint)
//! ```

pub mod server;

pub use server::AppState;
pub use server::HttpServer;
