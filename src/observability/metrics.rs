//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_cache_hits_total` (counter): requests answered from cache
//! - `gateway_breaker_activations_total` (counter): requests redirected
//!   to the fallback because the primary failed or the breaker was open
//! - `gateway_requests_total` (counter): requests by method and status
//! - `gateway_request_duration_seconds` (histogram): request latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            describe_counter!(
                "gateway_cache_hits_total",
                "Requests answered from the response cache"
            );
            describe_counter!(
                "gateway_breaker_activations_total",
                "Requests redirected to the fallback upstream"
            );
            describe_counter!("gateway_requests_total", "Requests by method and status");
            describe_histogram!(
                "gateway_request_duration_seconds",
                "Request latency in seconds"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// A request was answered from the cache.
pub fn record_cache_hit() {
    counter!("gateway_cache_hits_total").increment(1);
}

/// A request was redirected to the fallback upstream.
pub fn record_breaker_activation() {
    counter!("gateway_breaker_activations_total").increment(1);
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
