use serde::{Deserialize, Serialize};

/// Pending requests queued per worker when no explicit capacity is set.
pub const QUEUE_SLOTS_PER_WORKER: usize = 10;

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatcherConfig {
    /// Number of dig workers (default: 2)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Capacity of the admission queue. Once full, new requests wait.
    /// Defaults to `workers * 10`.
    #[serde(default)]
    pub queue_capacity: Option<usize>,
}

impl DispatcherConfig {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            queue_capacity: None,
        }
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    pub fn effective_queue_capacity(&self) -> usize {
        self.queue_capacity
            .unwrap_or(self.workers.saturating_mul(QUEUE_SLOTS_PER_WORKER))
            .max(1)
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::new(default_workers())
    }
}

fn default_workers() -> usize {
    2
}
