//! Debounce timer for keystroke-driven search
//!
//! The ranking function is pure and cheap, so debouncing is purely a
//! responsiveness concern for whoever drives it. The timer lives with the
//! caller: each new input supersedes the pending one, and a superseded
//! computation simply never runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default delay between the last keystroke and the recompute
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Resettable debounce timer
///
/// Cloning shares the timer: clones supersede each other's pending calls,
/// which is what a spawned-per-keystroke caller wants.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the delay, then run `compute` - unless a newer call or a
    /// `cancel` arrived in the meantime, in which case nothing runs and
    /// `None` comes back.
    pub async fn debounce<T>(&self, compute: impl FnOnce() -> T) -> Option<T> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) == my_generation {
            Some(compute())
        } else {
            None
        }
    }

    /// Invalidate whatever is pending without scheduling anything new
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uncontested_call_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        assert_eq!(debouncer.debounce(|| 42).await, Some(42));
    }

    #[tokio::test]
    async fn test_newer_call_supersedes_older() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let older = debouncer.clone();
        let first = tokio::spawn(async move { older.debounce(|| "first").await });

        // Let the first call register before typing the next character
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = debouncer.debounce(|| "second").await;

        assert_eq!(second, Some("second"));
        assert_eq!(first.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cancel_drops_pending_call() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let pending = debouncer.clone();
        let task = tokio::spawn(async move { pending.debounce(|| 1).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        debouncer.cancel();

        assert_eq!(task.await.unwrap(), None);
    }
}
