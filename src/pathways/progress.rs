use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Error type an observer may return; it is logged and never aborts a run
pub type ProgressError = Box<dyn std::error::Error + Send + Sync>;

/// Receives a notification after each source species has been searched.
///
/// Called from worker threads when the search runs in parallel, so completion
/// order is not source order.
pub trait ProgressObserver: Sync {
    /// `completed` of `total` sources are done; `paths` were found from the latest one
    fn source_completed(&self, completed: usize, total: usize, paths: usize) -> Result<(), ProgressError>;
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn source_completed(&self, _completed: usize, _total: usize, _paths: usize) -> Result<(), ProgressError> {
        Ok(())
    }
}

/// Observer that only keeps running totals, for callers that poll
#[derive(Debug, Default)]
pub struct ProgressCounter {
    sources: AtomicUsize,
    paths: AtomicUsize,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sources(&self) -> usize {
        self.sources.load(Ordering::Relaxed)
    }

    pub fn paths(&self) -> usize {
        self.paths.load(Ordering::Relaxed)
    }
}

impl ProgressObserver for ProgressCounter {
    fn source_completed(&self, _completed: usize, _total: usize, paths: usize) -> Result<(), ProgressError> {
        self.sources.fetch_add(1, Ordering::Relaxed);
        self.paths.fetch_add(paths, Ordering::Relaxed);
        Ok(())
    }
}

/// Shared flag that stops the all-pairs loop between sources
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
