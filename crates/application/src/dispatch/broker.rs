use dnsdig_domain::config::DispatcherConfig;
use dnsdig_domain::{Domain, DomainError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::request::{DigRequest, DigResult, ResultHandle};
use super::stats::{DispatcherStats, DispatcherStatsSnapshot};
use super::worker::{DigWorker, Inbox, WorkerHandle};
use crate::ports::{DomainRegistry, ResolverFactory, TldDetector};
use crate::use_cases::{AddDomainUseCase, AddQueryUseCase};

enum DispatcherState {
    Idle {
        pending_rx: mpsc::Receiver<DigRequest>,
        idle_rx: mpsc::Receiver<Inbox>,
    },
    Running {
        workers: Vec<WorkerHandle>,
        matcher: JoinHandle<()>,
    },
    Stopped,
}

/// Bounded worker pool for digs.
///
/// Built idle by [`DigDispatcher::new`]; requests may be admitted right
/// away and wait in the pending queue until [`DigDispatcher::start`]
/// spawns the workers and the matching loop.
pub struct DigDispatcher {
    workers: usize,
    queue_capacity: usize,
    resolvers: Arc<dyn ResolverFactory>,
    idle_tx: mpsc::Sender<Inbox>,
    add_domain: Arc<AddDomainUseCase>,
    add_query: AddQueryUseCase,
    stats: Arc<DispatcherStats>,
    shutdown: CancellationToken,
    state: Mutex<DispatcherState>,
}

impl DigDispatcher {
    pub fn new(
        config: &DispatcherConfig,
        resolvers: Arc<dyn ResolverFactory>,
        registry: Arc<dyn DomainRegistry>,
        detector: Arc<dyn TldDetector>,
    ) -> Self {
        let workers = if config.workers == 0 {
            warn!("Dispatcher configured with zero workers, using one");
            1
        } else {
            config.workers
        };
        let queue_capacity = DispatcherConfig {
            workers,
            ..config.clone()
        }
        .effective_queue_capacity();

        let (pending_tx, pending_rx) = mpsc::channel(queue_capacity);
        let (idle_tx, idle_rx) = mpsc::channel(workers);

        let stats = Arc::new(DispatcherStats::new());
        let add_domain = Arc::new(AddDomainUseCase::new(pending_tx, stats.clone()));
        let add_query =
            AddQueryUseCase::new(detector, registry, add_domain.clone(), stats.clone());

        Self {
            workers,
            queue_capacity,
            resolvers,
            idle_tx,
            add_domain,
            add_query,
            stats,
            shutdown: CancellationToken::new(),
            state: Mutex::new(DispatcherState::Idle {
                pending_rx,
                idle_rx,
            }),
        }
    }

    /// Spawns the workers and the matching loop. Must be called from within
    /// a Tokio runtime.
    ///
    /// # Errors
    ///
    /// * `DomainError::AlreadyStarted` - On the second call
    /// * `DomainError::DispatcherClosed` - After [`DigDispatcher::shutdown`]
    pub fn start(&self) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let (pending_rx, idle_rx) = match std::mem::replace(&mut *state, DispatcherState::Stopped)
        {
            DispatcherState::Idle {
                pending_rx,
                idle_rx,
            } => (pending_rx, idle_rx),
            running @ DispatcherState::Running { .. } => {
                *state = running;
                return Err(DomainError::AlreadyStarted);
            }
            DispatcherState::Stopped => return Err(DomainError::DispatcherClosed),
        };

        let workers = (0..self.workers)
            .map(|id| {
                DigWorker::new(
                    id,
                    self.idle_tx.clone(),
                    self.resolvers.create(id),
                    self.stats.clone(),
                )
                .start()
            })
            .collect();

        let matcher = tokio::spawn(match_requests(
            pending_rx,
            idle_rx,
            self.shutdown.clone(),
        ));

        *state = DispatcherState::Running { workers, matcher };

        info!(
            workers = self.workers,
            queue_capacity = self.queue_capacity,
            "Dispatcher started"
        );
        Ok(())
    }

    /// Queues a known domain. Suspends while the pending queue is full.
    pub async fn add_domain(&self, domain: Domain) -> ResultHandle {
        self.add_domain.execute(domain).await
    }

    /// Detects, registers and queues a raw query such as `ns1.google.co.uk`.
    ///
    /// Admission failures are delivered through the returned handle.
    pub async fn add_query(&self, query: &str) -> ResultHandle {
        self.add_query.execute(query).await
    }

    /// [`DigDispatcher::add_query`] followed by a bounded wait for the result.
    pub async fn add_query_timeout(&self, query: &str, timeout: Duration) -> DigResult {
        self.add_query(query).await.recv_timeout(timeout).await
    }

    pub fn stats(&self) -> DispatcherStatsSnapshot {
        self.stats.snapshot(self.workers, self.queue_capacity)
    }

    pub fn is_running(&self) -> bool {
        matches!(
            *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            DispatcherState::Running { .. }
        )
    }

    /// Stops the matching loop, then every worker, and waits for all tasks.
    ///
    /// Digs already handed to a worker complete normally. Requests still in
    /// the pending queue are dropped and their handles yield
    /// `DomainError::DispatcherClosed`, as does any later admission.
    pub async fn shutdown(&self) {
        let previous = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *state, DispatcherState::Stopped)
        };

        self.shutdown.cancel();

        let DispatcherState::Running { workers, matcher } = previous else {
            debug!("Dispatcher stopped before start");
            return;
        };

        if let Err(e) = matcher.await {
            error!(error = %e, "Matching loop failed");
        }

        for worker in &workers {
            worker.stop();
        }
        for worker in workers {
            worker.join().await;
        }

        info!("Dispatcher stopped");
    }
}

/// Pairs one idle worker inbox with one pending request, forever.
///
/// The idle inbox is taken first so that a request never waits inside this
/// loop while another worker could have served it.
async fn match_requests(
    mut pending_rx: mpsc::Receiver<DigRequest>,
    mut idle_rx: mpsc::Receiver<Inbox>,
    shutdown: CancellationToken,
) {
    loop {
        let inbox = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            inbox = idle_rx.recv() => match inbox {
                Some(inbox) => inbox,
                None => break,
            },
        };

        let request = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            request = pending_rx.recv() => match request {
                Some(request) => request,
                None => break,
            },
        };

        if !hand_off(inbox, request, &mut idle_rx, &shutdown).await {
            break;
        }
    }

    debug!("Matching loop stopped");
}

/// Sends `request` to `inbox`, falling back to the next idle inbox when the
/// worker behind it has stopped. Returns `false` once no inbox remains.
async fn hand_off(
    mut inbox: Inbox,
    mut request: DigRequest,
    idle_rx: &mut mpsc::Receiver<Inbox>,
    shutdown: &CancellationToken,
) -> bool {
    loop {
        match inbox.send(request).await {
            Ok(()) => return true,
            Err(SendError(returned)) => {
                debug!(
                    domain = %returned.domain().fqdn(),
                    "Worker inbox closed, trying the next idle worker"
                );
                request = returned;
            }
        }

        inbox = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return false,
            inbox = idle_rx.recv() => match inbox {
                Some(inbox) => inbox,
                None => return false,
            },
        };
    }
}
