use dnsdig_domain::{DnsRecord, Domain, DomainError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Outcome of one dig. Resolution failures still produce `Ok` with an
/// empty list; `Err` is reserved for admission and dispatcher failures.
pub type DigResult = Result<Vec<DnsRecord>, DomainError>;

/// A unit of work travelling from admission to exactly one worker.
#[derive(Debug)]
pub struct DigRequest {
    domain: Domain,
    result: oneshot::Sender<DigResult>,
}

impl DigRequest {
    pub fn new(domain: Domain) -> (Self, ResultHandle) {
        let (tx, rx) = oneshot::channel();
        (Self { domain, result: tx }, ResultHandle { rx })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Delivers the result, consuming the request.
    ///
    /// Returns `false` when the caller dropped its handle; the result is
    /// discarded in that case.
    pub fn complete(self, result: DigResult) -> bool {
        self.result.send(result).is_ok()
    }
}

/// Receiving side of a [`DigRequest`].
#[derive(Debug)]
pub struct ResultHandle {
    rx: oneshot::Receiver<DigResult>,
}

impl ResultHandle {
    /// A handle that already holds its result. Used for requests rejected
    /// before they reach the queue.
    pub fn resolved(result: DigResult) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { rx }
    }

    pub async fn recv(self) -> DigResult {
        self.rx
            .await
            .unwrap_or(Err(DomainError::DispatcherClosed))
    }

    /// Waits at most `timeout` for the result.
    ///
    /// The deadline only bounds the wait. The request stays queued or in
    /// flight and its result is discarded on arrival.
    pub async fn recv_timeout(self, timeout: Duration) -> DigResult {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(DomainError::DispatcherClosed),
            Err(_) => Err(DomainError::QueryTimeout),
        }
    }

    /// Non-blocking poll. `None` while the request is still pending.
    pub fn try_recv(&mut self) -> Option<DigResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(DomainError::DispatcherClosed)),
        }
    }
}
