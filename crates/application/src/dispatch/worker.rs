use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::request::DigRequest;
use super::stats::DispatcherStats;
use crate::ports::ResolverClient;

/// Sending half of a worker's private inbox. The broker receives one of
/// these each time the worker becomes idle.
pub type Inbox = mpsc::Sender<DigRequest>;

/// Long-lived dig worker.
///
/// The worker offers its inbox to the broker, waits for exactly one
/// request, digs it with its own resolver and offers the inbox again.
pub struct DigWorker {
    id: usize,
    inbox_tx: Inbox,
    inbox_rx: mpsc::Receiver<DigRequest>,
    idle_workers: mpsc::Sender<Inbox>,
    quit: CancellationToken,
    resolver: Box<dyn ResolverClient>,
    stats: Arc<DispatcherStats>,
}

impl DigWorker {
    pub fn new(
        id: usize,
        idle_workers: mpsc::Sender<Inbox>,
        resolver: Box<dyn ResolverClient>,
        stats: Arc<DispatcherStats>,
    ) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::channel(1);
        Self {
            id,
            inbox_tx,
            inbox_rx,
            idle_workers,
            quit: CancellationToken::new(),
            resolver,
            stats,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Spawns the run loop on the current Tokio runtime.
    pub fn start(self) -> WorkerHandle {
        let id = self.id;
        let quit = self.quit.clone();
        let join = tokio::spawn(self.run());
        WorkerHandle { id, quit, join }
    }

    async fn run(mut self) {
        debug!(worker_id = self.id, "Worker started");

        loop {
            tokio::select! {
                biased;
                _ = self.quit.cancelled() => break,
                sent = self.idle_workers.send(self.inbox_tx.clone()) => {
                    if sent.is_err() {
                        debug!(worker_id = self.id, "Idle queue closed");
                        break;
                    }
                }
            }

            let request = tokio::select! {
                biased;
                request = self.inbox_rx.recv() => request,
                _ = self.quit.cancelled() => None,
            };

            match request {
                Some(request) => self.process(request).await,
                None => break,
            }
        }

        // A hand-off racing with the quit signal is still honoured.
        self.inbox_rx.close();
        while let Ok(request) = self.inbox_rx.try_recv() {
            self.process(request).await;
        }

        info!(worker_id = self.id, "Worker stopped");
    }

    async fn process(&self, request: DigRequest) {
        let records = match self.resolver.resolve(request.domain()).await {
            Ok(records) => records,
            Err(e) => {
                error!(
                    worker_id = self.id,
                    domain = %request.domain().fqdn(),
                    error = %e,
                    "Dig failed"
                );
                self.stats.record_resolution_failure();
                Vec::new()
            }
        };

        debug!(
            worker_id = self.id,
            domain = %request.domain().fqdn(),
            records = records.len(),
            "Dig completed"
        );

        self.stats.record_completed();
        if !request.complete(Ok(records)) {
            debug!(worker_id = self.id, "Result handle dropped before completion");
        }
    }
}

/// Control side of a running [`DigWorker`].
pub struct WorkerHandle {
    id: usize,
    quit: CancellationToken,
    join: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn id(&self) -> usize {
        self.id
    }

    /// Asks the worker to stop once it is idle. A dig in progress is
    /// allowed to finish.
    pub fn stop(&self) {
        self.quit.cancel();
    }

    pub async fn join(self) {
        if let Err(e) = self.join.await {
            error!(worker_id = self.id, error = %e, "Worker task failed");
        }
    }
}
