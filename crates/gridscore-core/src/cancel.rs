//! Cooperative cancellation for long-running workflow stages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable cancellation flag shared between a workflow invocation
/// and whatever scheduler owns it.
///
/// The engine checks the token at coarse checkpoints (before and after
/// each pipeline stage) and periodically inside the feature-reduction
/// loop, which is the only stage that can run long. Observing a
/// cancelled token makes the run finish with a *cancelled* outcome,
/// distinct from an error, with no partial outputs retained.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; there is no un-cancel.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// True once [`cancel`](CancelToken::cancel) has been called on any
    /// clone of this token.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
