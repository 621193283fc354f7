use anyhow::Result;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{info, warn};

/// Graceful shutdown coordinator for Gymflow
///
/// Cloned receivers observe `true` once shutdown has been requested, either
/// by Ctrl-C or by the owner leaving the session screen.
pub struct ShutdownCoordinator {
    sender: watch::Sender<bool>,
}

/// Ctrl-C listener task, aborted when the guard is dropped
pub struct SignalGuard(JoinHandle<()>);

impl SignalGuard {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self(handle)
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }

    pub fn trigger(&self) {
        if !self.is_triggered() {
            info!("Shutdown requested");
        }
        self.sender.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    /// Install a Ctrl-C handler that triggers shutdown until the guard drops
    pub fn install_signal_handlers(&self) -> SignalGuard {
        info!("Installing signal handlers for graceful shutdown");
        let sender = self.sender.clone();
        SignalGuard::new(tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl-C, stopping session");
                    sender.send_replace(true);
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
        }))
    }

    /// Wait for a spawned session task to wind down, then log final usage
    pub async fn shutdown_all_services<T>(task: JoinHandle<T>) -> Result<T> {
        info!("Waiting for session task to finish...");
        let output = timeout(Duration::from_secs(5), task)
            .await
            .map_err(|_| anyhow::anyhow!("Timeout waiting for session task to finish"))??;

        crate::observability::api_metrics().log_stats();
        info!("Graceful shutdown completed successfully");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_subscribers() {
        let coordinator = ShutdownCoordinator::new();
        let mut rx = coordinator.subscribe();
        assert!(!*rx.borrow());

        coordinator.trigger();
        rx.changed().await.unwrap();
        assert!(*rx.borrow());
        assert!(coordinator.is_triggered());
    }

    #[tokio::test]
    async fn test_dropping_signal_guard_aborts_listener() {
        let (alive_tx, alive_rx) = tokio::sync::oneshot::channel::<()>();
        let guard = SignalGuard::new(tokio::spawn(async move {
            let _alive = alive_tx;
            std::future::pending::<()>().await;
        }));

        drop(guard);
        assert!(alive_rx.await.is_err());
    }

    #[tokio::test]
    async fn test_shutdown_all_services_returns_task_output() {
        let task = tokio::spawn(async { 7 });
        let value = ShutdownCoordinator::shutdown_all_services(task).await.unwrap();
        assert_eq!(value, 7);
    }
}
