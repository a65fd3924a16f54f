//! HTTP server setup and handlers.
//!
//! # Responsibilities
//! - Create the Axum router with the gateway endpoints
//! - Wire up middleware (request ID, tracing, outer timeout)
//! - Serve with graceful shutdown
//! - Record per-request metrics
//!
//! The resolver endpoint always answers HTTP 200: a `message` field on
//! any success path (cache, primary, fallback) and an `error` field on
//! total failure. Callers depend on this contract; upstream failure is
//! never signaled through the status code.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::gateway::Resolver;
use crate::observability::metrics;

/// Outer bound on a whole request; generous next to the 2s upstream
/// deadlines, it only catches a wedged handler.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        let state = AppState { resolver };
        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/api/v1/consul", get(consult_handler))
            .route("/", get(consult_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The single gateway endpoint: cache → primary → fallback.
async fn consult_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let start = Instant::now();
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::debug!(request_id = %request_id, "Resolving request");

    let resolution = state.resolver.resolve().await;
    let body = resolution.to_body();

    metrics::record_request("GET", StatusCode::OK.as_u16(), start);
    (StatusCode::OK, Json(body))
}

/// Unconditional process liveness answer; does not check the cache or
/// either upstream.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "A" }))
}
