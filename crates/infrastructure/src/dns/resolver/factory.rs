use super::UdpResolverClient;
use crate::dns::transport::UdpTransport;
use dnsdig_application::ports::{ResolverClient, ResolverFactory};
use dnsdig_domain::config::ResolverConfig;
use dnsdig_domain::{DomainError, RecordType};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds one [`UdpResolverClient`] per worker, all pointed at the same
/// upstream.
pub struct UdpResolverFactory {
    upstream: SocketAddr,
    record_types: Arc<[RecordType]>,
    timeout: Duration,
}

impl UdpResolverFactory {
    pub fn new(upstream: SocketAddr, record_types: Vec<RecordType>, timeout: Duration) -> Self {
        Self {
            upstream,
            record_types: record_types.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        let upstream = config.upstream.parse().map_err(|e| {
            DomainError::ResolutionFailed(format!("Invalid upstream '{}': {}", config.upstream, e))
        })?;

        Ok(Self::new(
            upstream,
            config.record_types.clone(),
            config.timeout(),
        ))
    }

    pub fn upstream(&self) -> SocketAddr {
        self.upstream
    }
}

impl ResolverFactory for UdpResolverFactory {
    fn create(&self, worker_id: usize) -> Box<dyn ResolverClient> {
        Box::new(UdpResolverClient::new(
            worker_id,
            Box::new(UdpTransport::new(self.upstream)),
            self.record_types.clone(),
            self.timeout,
        ))
    }
}
