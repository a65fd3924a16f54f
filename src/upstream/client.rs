//! HTTP client for upstream calls.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::time;

/// Fixed per-call deadline for both upstreams.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Upstream bodies are buffered; anything larger is a body error.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Error calling an upstream.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("upstream call timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("failed to read upstream body: {0}")]
    Body(#[source] axum::Error),
}

/// A buffered upstream response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Shared client for upstream GET calls.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
}

impl UpstreamClient {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// GET `url`, bounded by [`CALL_TIMEOUT`].
    ///
    /// Any HTTP response, whatever its status, is an `Ok` here; the
    /// caller decides what a given status means.
    pub async fn call(&self, url: &str) -> Result<UpstreamResponse, CallError> {
        let request = Request::builder()
            .method("GET")
            .uri(url)
            .header("user-agent", "failover-gateway")
            .body(Body::empty())?;

        let response = match time::timeout(CALL_TIMEOUT, self.client.request(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(CallError::Transport(e)),
            Err(_) => return Err(CallError::Timeout(CALL_TIMEOUT)),
        };

        let status = response.status();
        let bytes = axum::body::to_bytes(Body::new(response.into_body()), MAX_BODY_BYTES)
            .await
            .map_err(CallError::Body)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(UpstreamResponse { status, body })
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}
