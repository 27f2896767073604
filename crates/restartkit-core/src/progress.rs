//! Decode-progress observation.
//!
//! The orchestrator reports `(completed, total)` pairs to an injected
//! observer at a bounded cadence. The parsing components have zero
//! dependency on this module — only the decode loop notifies.

use parking_lot::Mutex;

/// Observer for decode progress.
///
/// Implementations MUST be non-blocking and MUST NOT panic: notification
/// is fire-and-forget on the decode path, and an observer can never fail
/// or stall the decode. `completed` is monotonic within one decode, so an
/// aggregating implementation needs no ordering assumptions beyond that.
pub trait ProgressObserver: Send + Sync {
    /// Called after `completed` of `total` records have been decoded.
    fn on_progress(&self, completed: usize, total: usize);
}

/// No-op observer that compiles to nothing. Default when progress
/// reporting is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressObserver for NoOpProgress {
    #[inline(always)]
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

/// Observer that records every notification, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct CollectingProgress {
    notifications: Mutex<Vec<(usize, usize)>>,
}

impl CollectingProgress {
    /// A fresh, empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, in arrival order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(usize, usize)> {
        self.notifications.lock().clone()
    }

    /// Number of notifications received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.lock().len()
    }

    /// Whether no notification has been received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.lock().is_empty()
    }
}

impl ProgressObserver for CollectingProgress {
    fn on_progress(&self, completed: usize, total: usize) {
        self.notifications.lock().push((completed, total));
    }
}

/// Notification stride for `total` records: every `max(1, total / 20)`
/// records, i.e. roughly twenty updates per decode regardless of size.
#[must_use]
pub fn progress_stride(total: usize) -> usize {
    (total / 20).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_small_counts() {
        assert_eq!(progress_stride(1), 1);
        assert_eq!(progress_stride(19), 1);
        assert_eq!(progress_stride(20), 1);
        assert_eq!(progress_stride(40), 2);
        assert_eq!(progress_stride(100), 5);
    }

    #[test]
    fn collector_records_in_order() {
        let collector = CollectingProgress::new();
        assert!(collector.is_empty());
        collector.on_progress(1, 3);
        collector.on_progress(2, 3);
        collector.on_progress(3, 3);
        assert_eq!(collector.len(), 3);
        assert_eq!(collector.snapshot(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn noop_is_inert() {
        NoOpProgress.on_progress(5, 10);
    }
}
