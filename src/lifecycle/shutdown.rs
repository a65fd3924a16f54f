//! Shutdown coordination for the gateway.

use tokio::sync::broadcast;

/// Broadcast fan-out for the shutdown signal.
///
/// Two tasks subscribe: the HTTP server (which drains in-flight
/// requests and stops accepting) and the liveness monitor (which just
/// exits its loop). `trigger` is called once, from the Ctrl-C handler
/// in main.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe before spawning the task that will wait on the signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal all subscribers to stop.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_every_subscriber() {
        let shutdown = Shutdown::new();
        let mut server_rx = shutdown.subscribe();
        let mut monitor_rx = shutdown.subscribe();

        shutdown.trigger();

        assert!(server_rx.recv().await.is_ok());
        assert!(monitor_rx.recv().await.is_ok());
    }
}
