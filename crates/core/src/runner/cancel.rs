//! Cancellation and the single-active-batch guard.
//!
//! Cancellation is cooperative: the runner checks the token between jobs
//! and never interrupts a transcoder process that is already running.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use tokio_util::sync::CancellationToken;

/// Marks a runner as busy for as long as the guard lives.
#[derive(Debug)]
pub(crate) struct ActiveGuard {
    flag: Arc<AtomicBool>,
}

impl ActiveGuard {
    /// Claims the flag, or returns `None` when a batch already holds it.
    pub(crate) fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive() {
        let flag = Arc::new(AtomicBool::new(false));

        let guard = ActiveGuard::acquire(&flag).unwrap();
        assert!(ActiveGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::SeqCst));
        assert!(ActiveGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_token_clones_share_state() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }
}
