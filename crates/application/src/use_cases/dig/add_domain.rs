use dnsdig_domain::{Domain, DomainError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tracing::{debug, instrument, warn};

use crate::dispatch::{DigRequest, DispatcherStats, ResultHandle};

/// Queues a known domain for digging.
pub struct AddDomainUseCase {
    pending: mpsc::Sender<DigRequest>,
    stats: Arc<DispatcherStats>,
}

impl AddDomainUseCase {
    pub fn new(pending: mpsc::Sender<DigRequest>, stats: Arc<DispatcherStats>) -> Self {
        Self { pending, stats }
    }

    /// Waits for queue space, then returns the handle of the queued request.
    #[instrument(skip(self, domain), fields(domain = %domain.fqdn()))]
    pub async fn execute(&self, domain: Domain) -> ResultHandle {
        let (request, handle) = DigRequest::new(domain);

        match self.pending.send(request).await {
            Ok(()) => {
                self.stats.record_queued();
                debug!("Request queued");
            }
            Err(SendError(request)) => {
                warn!("Dispatcher is closed, rejecting request");
                self.stats.record_admission_failure();
                request.complete(Err(DomainError::DispatcherClosed));
            }
        }

        handle
    }
}
