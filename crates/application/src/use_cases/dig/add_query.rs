use dashmap::DashMap;
use dnsdig_domain::{Domain, DomainError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use super::AddDomainUseCase;
use crate::dispatch::{DispatcherStats, ResultHandle};
use crate::ports::{DetectedDomain, DomainRegistry, TldDetector};

type PairKey = (Arc<str>, i32);

/// Turns a raw query string into a registered domain and queues it.
///
/// Lookup-or-create is serialised per `(name, tld)` pair, so concurrent
/// queries for the same domain insert it at most once.
pub struct AddQueryUseCase {
    detector: Arc<dyn TldDetector>,
    registry: Arc<dyn DomainRegistry>,
    add_domain: Arc<AddDomainUseCase>,
    stats: Arc<DispatcherStats>,
    in_flight: DashMap<PairKey, Arc<Mutex<()>>>,
}

impl AddQueryUseCase {
    pub fn new(
        detector: Arc<dyn TldDetector>,
        registry: Arc<dyn DomainRegistry>,
        add_domain: Arc<AddDomainUseCase>,
        stats: Arc<DispatcherStats>,
    ) -> Self {
        Self {
            detector,
            registry,
            add_domain,
            stats,
            in_flight: DashMap::new(),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, query: &str) -> ResultHandle {
        match self.admit(query).await {
            Ok(domain) => self.add_domain.execute(domain).await,
            Err(e) => {
                self.stats.record_admission_failure();
                ResultHandle::resolved(Err(e))
            }
        }
    }

    async fn admit(&self, query: &str) -> Result<Domain, DomainError> {
        let normalized = normalize_query(query).inspect_err(|e| {
            error!(query = %query, error = %e, "Rejected query");
        })?;

        let detected = self
            .detector
            .detect(&normalized)
            .await
            .inspect_err(|e| {
                error!(query = %normalized, error = %e, "TLD detection failed");
            })?;

        self.find_or_create(detected).await
    }

    async fn find_or_create(&self, detected: DetectedDomain) -> Result<Domain, DomainError> {
        let key: PairKey = (detected.name.clone(), detected.tld.id);
        // Declared before `mutex` so it drops after it, also on cancellation.
        let _release = PairRelease {
            map: &self.in_flight,
            key: key.clone(),
        };
        let mutex = self
            .in_flight
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = mutex.lock().await;

        self.lookup_or_insert(&detected).await
    }

    /// Number of `(name, tld)` pairs with a registration in progress.
    pub fn pairs_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    async fn lookup_or_insert(&self, detected: &DetectedDomain) -> Result<Domain, DomainError> {
        let found = self
            .registry
            .find_by_name_and_tld(&detected.name, detected.tld.id)
            .await
            .inspect_err(|e| {
                error!(
                    name = %detected.name,
                    tld = %detected.tld.name,
                    error = %e,
                    "Domain lookup failed"
                );
            })?;

        if let Some(domain) = found {
            debug!(uuid = %domain.uuid, "Domain already registered");
            return Ok(domain);
        }

        let domain = Domain::new(detected.name.clone(), detected.tld.clone());
        let insert_err = match self.registry.insert(&domain).await {
            Ok(()) => {
                info!(uuid = %domain.uuid, domain = %domain.fqdn(), "Domain registered");
                return Ok(domain);
            }
            Err(e) => e,
        };

        warn!(
            domain = %domain.fqdn(),
            error = %insert_err,
            "Insert failed, checking for a concurrent registration"
        );

        match self
            .registry
            .find_by_name_and_tld(&detected.name, detected.tld.id)
            .await
        {
            Ok(Some(existing)) => Ok(existing),
            _ => {
                error!(domain = %domain.fqdn(), error = %insert_err, "Unable to register domain");
                Err(DomainError::PersistenceFailed(format!(
                    "{}: {}",
                    domain.fqdn(),
                    insert_err
                )))
            }
        }
    }
}

/// Removes a pair's map entry once no caller holds its mutex any more.
/// Runs on completion and when the admitting future is dropped mid-way.
struct PairRelease<'a> {
    map: &'a DashMap<PairKey, Arc<Mutex<()>>>,
    key: PairKey,
}

impl Drop for PairRelease<'_> {
    fn drop(&mut self) {
        self.map
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// Trims, lowercases and strips one trailing dot.
pub fn normalize_query(query: &str) -> Result<String, DomainError> {
    let trimmed = query.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Err(DomainError::DetectionFailed(format!(
            "empty query '{}'",
            query
        )));
    }

    Ok(trimmed.to_ascii_lowercase())
}
