//! Cooperative cancellation for refresh work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::FetchError;

/// Shared cancellation flag.
///
/// ```
/// use devpulse_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Return `Err(FetchError::Cancelled)` once cancellation was requested.
    pub fn check_cancelled(&self) -> Result<(), FetchError> {
        if self.is_cancelled() {
            Err(FetchError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, waking every `poll` to check for cancellation.
    pub fn sleep(&self, duration: Duration, poll: Duration) -> Result<(), FetchError> {
        let deadline = Instant::now() + duration;
        loop {
            self.check_cancelled()?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            std::thread::sleep(poll.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn sleep_completes() {
        let token = CancellationToken::new();
        let start = Instant::now();
        assert!(token
            .sleep(Duration::from_millis(20), Duration::from_millis(5))
            .is_ok());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn sleep_aborts_when_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(
            token.sleep(Duration::from_secs(10), Duration::from_millis(5)),
            Err(FetchError::Cancelled)
        );
    }

    #[test]
    fn sleep_observes_cancel_from_other_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        let result = token.sleep(Duration::from_secs(10), Duration::from_millis(5));
        handle.join().unwrap();
        assert_eq!(result, Err(FetchError::Cancelled));
    }
}
