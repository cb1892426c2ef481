//! Per-request cancellation for view fetches.
//!
//! A [`ViewScope`] lives inside the view; its [`ScopeGuard`] lives in the
//! handler. When the guard drops (the request finished or its future was
//! dropped), every fetch still running under the scope resolves to `None`
//! and the view is left alone.

use std::future::Future;

use tokio::sync::watch;

/// Cancellation scope shared by the fetches of one view.
#[derive(Debug, Clone)]
pub struct ViewScope {
    cancelled: watch::Receiver<bool>,
}

/// Cancels its [`ViewScope`] when dropped.
#[derive(Debug)]
pub struct ScopeGuard {
    cancel: watch::Sender<bool>,
}

impl ViewScope {
    /// Create a scope and the guard that ends it.
    #[must_use]
    pub fn new() -> (Self, ScopeGuard) {
        let (cancel, cancelled) = watch::channel(false);
        (Self { cancelled }, ScopeGuard { cancel })
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Drive `future` to completion unless the scope is cancelled first.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }

        let mut cancelled = self.cancelled.clone();
        tokio::select! {
            biased;
            () = wait_for_cancel(&mut cancelled) => None,
            output = future => Some(output),
        }
    }
}

impl ScopeGuard {
    /// End the scope now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

async fn wait_for_cancel(cancelled: &mut watch::Receiver<bool>) {
    loop {
        if *cancelled.borrow_and_update() {
            return;
        }
        // Sender gone means the guard is gone.
        if cancelled.changed().await.is_err() {
            return;
        }
    }
}
