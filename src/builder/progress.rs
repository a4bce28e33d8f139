use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// while the builder polls the other once per scan.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    canceled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not canceled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the current scan still completes
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation was requested
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

/// Scan-level progress of a build, readable from any thread
#[derive(Debug, Default)]
pub struct ProgressTracker {
    processed: AtomicUsize,
    total: AtomicUsize,
}

impl ProgressTracker {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn start(&self, total: usize) {
        self.processed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    pub(crate) fn advance(&self) -> usize {
        self.processed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Scans handled so far
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    /// Scans in the current run (0 before a run starts)
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// `processed / total`, or None before any scan has been processed
    pub fn finished_fraction(&self) -> Option<f64> {
        let processed = self.processed();
        let total = self.total();
        if processed == 0 || total == 0 {
            return None;
        }
        Some(processed as f64 / total as f64)
    }
}
