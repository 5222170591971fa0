//! Process-wide stop signal.
//!
//! One [`Shutdown`] is created in `main`. OS signals and tests both end up in
//! [`Shutdown::trigger`]; the server and any other long-running task hold a
//! [`ShutdownListener`] and stop once it resolves.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::lifecycle::signals::shutdown_signal;

#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A listener that resolves on the next trigger. Subscribe before the
    /// trigger can fire; earlier triggers are not replayed.
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Stop every listener. Returns how many were notified.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }

    /// Trigger once SIGINT or SIGTERM arrives.
    pub fn trigger_on_signal(&self) -> JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            let notified = shutdown.trigger();
            tracing::info!(listeners = notified, "Shutdown triggered by signal");
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half held by a task that must stop on shutdown.
#[derive(Debug)]
pub struct ShutdownListener {
    rx: broadcast::Receiver<()>,
}

impl ShutdownListener {
    /// Resolve on trigger, or when every `Shutdown` handle is gone.
    pub async fn wait(mut self) {
        let _ = self.rx.recv().await;
    }
}
