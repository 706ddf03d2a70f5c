//! Stop signalling for background work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A stop request that workers poll between units of work.
///
/// The optimizer runs trials on its own thread; the session side holds
/// the other end of this and flips it when a staged outcome is no
/// longer wanted. Nothing is interrupted forcibly, so a worker that
/// never polls never stops.
pub trait Cancellable {
    /// True once a stop has been requested. Polled by the worker.
    fn is_cancelled(&self) -> bool;

    /// Ask the worker to wind down at its next poll.
    fn cancel(&self);
}

/// Shared stop flag. Cloning hands out another view of the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_cancelled_clone_is_visible_through_the_original() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!handle.is_cancelled());

        token.cancel();
        assert!(handle.is_cancelled());
        assert!(token.is_cancelled());
    }
}
