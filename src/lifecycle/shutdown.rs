//! Shutdown coordination for the service.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::lifecycle::signals::wait_for_signal;

/// Coordinator for graceful shutdown.
///
/// A one-way latch: once triggered it stays triggered, so a signal taken
/// after the trigger still resolves.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Receiving half of a [`Shutdown`], handed to the serve loop.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Latch the shutdown state and wake every waiting signal.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Trigger once the process receives SIGINT or SIGTERM.
    pub fn trigger_on_os_signal(&self) -> JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            shutdown.trigger();
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered, or every [`Shutdown`] is dropped.
    pub async fn wait(mut self) {
        // Err means the coordinator is gone; nothing can trigger any more.
        let _ = self.rx.wait_for(|&stopped| stopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_every_signal() {
        let shutdown = Shutdown::new();
        let a = tokio::spawn(shutdown.signal().wait());
        let b = tokio::spawn(shutdown.signal().wait());

        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), async {
            a.await.unwrap();
            b.await.unwrap();
        })
        .await
        .expect("signals should observe the trigger");
    }

    #[tokio::test]
    async fn test_signal_taken_after_trigger_resolves() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), shutdown.signal().wait())
            .await
            .expect("late signal should see the latched trigger");
    }

    #[tokio::test]
    async fn test_untriggered_signal_stays_pending() {
        let shutdown = Shutdown::new();
        let outcome =
            tokio::time::timeout(Duration::from_millis(50), shutdown.signal().wait()).await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn test_dropped_coordinator_releases_waiters() {
        let shutdown = Shutdown::new();
        let waiter = tokio::spawn(shutdown.signal().wait());
        drop(shutdown);

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
    }
}
