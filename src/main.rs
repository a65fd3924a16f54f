//! Resilient single-endpoint failover gateway ("service A").
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                FAILOVER GATEWAY                 │
//!                    │                                                 │
//!   Client Request   │  ┌────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ gateway  │──▶│ cache client │──┼──▶ Redis
//!                    │  │ server │   │ resolver │   └──────────────┘  │
//!                    │  └────────┘   │          │   ┌──────────────┐  │
//!                    │               │          │──▶│   breaker    │──┼──▶ Primary
//!                    │               │          │   └──────────────┘  │    upstream
//!                    │               │          │──────────────────────┼──▶ Fallback
//!                    │               └──────────┘                     │    upstream
//!                    │                                                 │
//!                    │  ┌─────────────────────────────────────────┐   │
//!                    │  │           Cross-Cutting Concerns         │   │
//!                    │  │  config │ liveness │ metrics │ lifecycle │   │
//!                    │  └─────────────────────────────────────────┘   │
//!                    └────────────────────────────────────────────────┘
//! ```
//!
//! Per request: cache lookup → breaker-guarded primary call → failure
//! classification → fallback call → cache population → response. A
//! background watchdog kills the process if the cache store becomes
//! unreachable; the process manager restarts it.

use std::sync::Arc;

use tokio::net::TcpListener;

use failover_gateway::cache::{RedisCache, ResponseCache};
use failover_gateway::config::GatewayConfig;
use failover_gateway::gateway::Resolver;
use failover_gateway::health::LivenessMonitor;
use failover_gateway::http::HttpServer;
use failover_gateway::lifecycle::Shutdown;
use failover_gateway::observability::{logging, metrics};
use failover_gateway::resilience::CircuitBreaker;
use failover_gateway::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env()?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!("failover-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        primary_url = %config.upstreams.primary_url,
        fallback_url = %config.upstreams.fallback_url,
        cache_url = %config.cache.url(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Unreachable cache store at startup is fatal, matching the
    // watchdog's runtime policy.
    let cache: Arc<dyn ResponseCache> = Arc::new(RedisCache::connect(&config.cache.url()).await?);
    let breaker = Arc::new(CircuitBreaker::default());
    let resolver = Arc::new(Resolver::new(
        cache.clone(),
        breaker,
        UpstreamClient::new(),
        config.upstreams.primary_url.clone(),
        config.upstreams.fallback_url.clone(),
    ));

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let monitor = LivenessMonitor::new(cache);
    let monitor_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        monitor.run(monitor_shutdown).await;
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
        }
        shutdown.trigger();
    });

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(resolver);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
