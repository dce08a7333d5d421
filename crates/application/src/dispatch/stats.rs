use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared by admission, the workers and the dispatcher.
#[derive(Debug, Default)]
pub struct DispatcherStats {
    queued: AtomicU64,
    completed: AtomicU64,
    resolution_failures: AtomicU64,
    admission_failures: AtomicU64,
}

impl DispatcherStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_queued(&self) {
        self.queued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_resolution_failure(&self) {
        self.resolution_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_admission_failure(&self) {
        self.admission_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, workers: usize, queue_capacity: usize) -> DispatcherStatsSnapshot {
        DispatcherStatsSnapshot {
            queued: self.queued.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            resolution_failures: self.resolution_failures.load(Ordering::Relaxed),
            admission_failures: self.admission_failures.load(Ordering::Relaxed),
            workers,
            queue_capacity,
        }
    }
}

/// Point-in-time copy of [`DispatcherStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherStatsSnapshot {
    /// Requests accepted into the pending queue
    pub queued: u64,
    /// Requests whose result was written by a worker
    pub completed: u64,
    /// Digs where the resolver returned an error
    pub resolution_failures: u64,
    /// Requests rejected before reaching the queue
    pub admission_failures: u64,
    pub workers: usize,
    pub queue_capacity: usize,
}

impl DispatcherStatsSnapshot {
    /// Requests queued but not yet completed.
    pub fn in_flight(&self) -> u64 {
        self.queued.saturating_sub(self.completed)
    }
}
