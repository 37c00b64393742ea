//! Engine readiness signal
//!
//! Replaces a fixed settling delay: the engine raises the signal when a
//! scene load may proceed, and loaders await it.

use tokio::sync::watch;

/// Level-triggered readiness flag with async waiting
#[derive(Debug)]
pub struct Readiness {
    tx: watch::Sender<bool>,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl Readiness {
    /// Create a signal in the not-ready state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn set_ready(&self, ready: bool) {
        self.tx.send_replace(ready);
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the signal is ready. Returns immediately if it already is.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender outlives this borrow, so the channel cannot close here
        let _ = rx.wait_for(|ready| *ready).await;
    }
}
