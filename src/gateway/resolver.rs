//! Per-request orchestration: cache, breaker, primary, fallback.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::cache::ResponseCache;
use crate::observability::metrics;
use crate::resilience::CircuitBreaker;
use crate::upstream::{CallError, UpstreamClient, UpstreamResponse};

/// The single cache key: last known good primary response.
pub const CACHE_KEY: &str = "primary:last_response";

/// How long a cached primary response stays valid.
pub const CACHE_TTL: Duration = Duration::from_secs(20);

/// Outcome of one resolution, rendered into the response body by
/// [`Resolution::to_body`].
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the cache; no upstream was contacted.
    Cached(String),
    /// Fresh answer from the primary upstream.
    Primary(String),
    /// Primary failed or breaker open; answer from the fallback.
    Fallback(String),
    /// Both upstreams failed.
    Degraded,
}

impl Resolution {
    /// JSON body for the always-200 endpoint contract: `message` on
    /// any success path, `error` on total failure.
    pub fn to_body(&self) -> Value {
        match self {
            Resolution::Cached(v) => json!({ "message": format!("primary (cached): {v}") }),
            Resolution::Primary(v) => json!({ "message": format!("primary: {v}") }),
            Resolution::Fallback(v) => {
                json!({ "message": format!("primary failed, fallback: {v}") })
            }
            Resolution::Degraded => {
                json!({ "error": "both primary and fallback upstreams failed" })
            }
        }
    }
}

/// Classified result of the breaker-guarded primary call.
enum PrimaryOutcome {
    Ok(UpstreamResponse),
    ServerError(StatusCode),
    Transport(CallError),
    BreakerOpen,
}

/// Per-request orchestrator.
///
/// Owns no mutable state of its own; the breaker and the cache store
/// are the shared, injected collaborators.
pub struct Resolver {
    cache: Arc<dyn ResponseCache>,
    breaker: Arc<CircuitBreaker>,
    upstream: UpstreamClient,
    primary_url: String,
    fallback_url: String,
}

impl Resolver {
    pub fn new(
        cache: Arc<dyn ResponseCache>,
        breaker: Arc<CircuitBreaker>,
        upstream: UpstreamClient,
        primary_url: String,
        fallback_url: String,
    ) -> Self {
        Self {
            cache,
            breaker,
            upstream,
            primary_url,
            fallback_url,
        }
    }

    /// Resolve one request. Total: every failure path collapses into a
    /// [`Resolution`] variant, nothing escapes to the transport layer.
    pub async fn resolve(&self) -> Resolution {
        match self.cache.get(CACHE_KEY).await {
            Ok(Some(value)) => {
                tracing::debug!("Serving cached primary response");
                metrics::record_cache_hit();
                return Resolution::Cached(value);
            }
            Ok(None) => {}
            // Store unreachable reads degrade to a miss; the liveness
            // monitor owns the fatal decision.
            Err(e) => tracing::warn!(error = %e, "Cache read failed; treating as miss"),
        }

        match self.call_primary().await {
            PrimaryOutcome::Ok(response) => {
                if let Err(e) = self
                    .cache
                    .set_with_expiry(CACHE_KEY, &response.body, CACHE_TTL)
                    .await
                {
                    tracing::error!(error = %e, "Failed to cache primary response");
                }
                Resolution::Primary(response.body)
            }
            PrimaryOutcome::ServerError(status) => {
                tracing::warn!(status = %status, "Primary returned server error; redirecting to fallback");
                self.failover().await
            }
            PrimaryOutcome::Transport(e) => {
                tracing::warn!(error = %e, "Primary unreachable; redirecting to fallback");
                self.failover().await
            }
            PrimaryOutcome::BreakerOpen => {
                tracing::warn!("Circuit breaker open; redirecting to fallback");
                self.failover().await
            }
        }
    }

    /// Call the primary upstream through the breaker and classify the
    /// result for breaker accounting: transport errors, timeouts, and
    /// 5xx are failures; any other response (4xx included) is success.
    async fn call_primary(&self) -> PrimaryOutcome {
        if self.breaker.check().is_err() {
            return PrimaryOutcome::BreakerOpen;
        }

        tracing::debug!(url = %self.primary_url, "Calling primary upstream");
        match self.upstream.call(&self.primary_url).await {
            Ok(response) if response.status.is_server_error() => {
                self.breaker.on_failure();
                PrimaryOutcome::ServerError(response.status)
            }
            Ok(response) => {
                self.breaker.on_success();
                PrimaryOutcome::Ok(response)
            }
            Err(e) => {
                self.breaker.on_failure();
                PrimaryOutcome::Transport(e)
            }
        }
    }

    /// Take the fallback path: count the activation, then call the
    /// fallback upstream, not breaker-guarded. Any HTTP response counts
    /// as a fallback success; only call-level failure degrades the
    /// request.
    async fn failover(&self) -> Resolution {
        metrics::record_breaker_activation();
        tracing::debug!(url = %self.fallback_url, "Calling fallback upstream");
        match self.upstream.call(&self.fallback_url).await {
            Ok(response) => Resolution::Fallback(response.body),
            Err(e) => {
                tracing::error!(error = %e, "Fallback upstream failed as well");
                Resolution::Degraded
            }
        }
    }
}
