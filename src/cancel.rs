//! Cancellation token for in-flight requests

use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable cancellation signal
///
/// A screen that goes away calls [`CancelToken::cancel`]; every request
/// racing against a clone of the token then returns
/// [`crate::ApiError::Cancelled`] and its connection is dropped.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Creates a token that hasn't been cancelled
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// A token for callers that never cancel
    pub fn none() -> Self {
        Self::new()
    }

    /// Cancels every request holding a clone of this token
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true once `cancel` was called on any clone
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves when the token is cancelled
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel can't close while we wait.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}
