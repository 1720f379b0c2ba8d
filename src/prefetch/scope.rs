//! Lifetime scope for background prefetches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Cancellation scope shared by every prefetch a scheduler starts.
///
/// Cancelling, or dropping the scope, wakes every outstanding token.
pub struct PrefetchScope {
    tx: broadcast::Sender<()>,
    cancelled: Arc<AtomicBool>,
}

impl PrefetchScope {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Token for one prefetch bound to this scope.
    pub fn token(&self) -> ScopeToken {
        ScopeToken {
            rx: self.tx.subscribe(),
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Abandon every prefetch started under this scope.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            let _ = self.tx.send(());
            tracing::debug!(outstanding = self.tx.receiver_count(), "Prefetch scope cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Number of tokens still held by running prefetches.
    pub fn outstanding(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for PrefetchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PrefetchScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Handle a running prefetch selects against.
pub struct ScopeToken {
    rx: broadcast::Receiver<()>,
    cancelled: Arc<AtomicBool>,
}

impl ScopeToken {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the scope is cancelled or dropped.
    pub async fn cancelled(&mut self) {
        if self.is_cancelled() {
            return;
        }
        // Ok, Closed and Lagged all mean the scope is gone or cancelled.
        let _ = self.rx.recv().await;
    }
}
