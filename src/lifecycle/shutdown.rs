//! Shutdown coordination for the tunnel.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// The server subscribes before serving; signal handlers (or tests) trigger it.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal. Safe to call more than once.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
