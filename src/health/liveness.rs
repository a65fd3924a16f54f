//! Cache store liveness watchdog.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::cache::ResponseCache;

/// Interval between cache store probes.
pub const LIVENESS_INTERVAL: Duration = Duration::from_secs(10);

/// Background watchdog for the cache store.
///
/// Terminates the whole process on the first failed probe; no retry,
/// no graceful drain. The gateway's fast path depends on the cache
/// being reachable, and the process manager restarts us.
pub struct LivenessMonitor {
    cache: Arc<dyn ResponseCache>,
    interval: Duration,
}

impl LivenessMonitor {
    pub fn new(cache: Arc<dyn ResponseCache>) -> Self {
        Self {
            cache,
            interval: LIVENESS_INTERVAL,
        }
    }

    /// One probe cycle. Split out of the loop so the decision is
    /// testable without terminating the test process.
    pub async fn check(&self) -> bool {
        match self.cache.ping().await {
            Ok(()) => {
                tracing::info!("Cache store reachable");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Cache store unreachable");
                false
            }
        }
    }

    /// Run the watchdog until shutdown. The first tick fires
    /// immediately, so an unreachable store at startup is fatal within
    /// the first cycle.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Liveness monitor starting"
        );

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !self.check().await {
                        tracing::error!("Terminating process; expecting supervisor restart");
                        std::process::exit(1);
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Liveness monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::cache::CacheError;

    struct FlakyStore {
        healthy: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl ResponseCache for FlakyStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }

        async fn set_with_expiry(
            &self,
            _key: &str,
            _value: &str,
            _ttl: Duration,
        ) -> Result<(), CacheError> {
            Ok(())
        }

        async fn ping(&self) -> Result<(), CacheError> {
            if self.healthy.load(std::sync::atomic::Ordering::SeqCst) {
                Ok(())
            } else {
                Err(CacheError::Store(redis::RedisError::from((
                    redis::ErrorKind::IoError,
                    "connection refused",
                ))))
            }
        }
    }

    #[tokio::test]
    async fn test_check_reflects_store_health() {
        let store = Arc::new(FlakyStore {
            healthy: std::sync::atomic::AtomicBool::new(true),
        });
        let monitor = LivenessMonitor::new(store.clone());

        assert!(monitor.check().await);

        store
            .healthy
            .store(false, std::sync::atomic::Ordering::SeqCst);
        assert!(!monitor.check().await);
    }
}
