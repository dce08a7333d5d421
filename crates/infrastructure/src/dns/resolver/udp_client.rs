use crate::dns::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use dnsdig_application::ports::ResolverClient;
use dnsdig_domain::{DnsRecord, Domain, DomainError, RecordType};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Digs a domain by sending one recursive query per configured record type
/// to a single upstream server.
///
/// NXDOMAIN and NODATA answers are successful digs with no records. The
/// dig fails only when no record type got a usable answer.
pub struct UdpResolverClient {
    worker_id: usize,
    transport: Box<dyn DnsTransport>,
    record_types: Arc<[RecordType]>,
    timeout: Duration,
}

impl UdpResolverClient {
    pub fn new(
        worker_id: usize,
        transport: Box<dyn DnsTransport>,
        record_types: Arc<[RecordType]>,
        timeout: Duration,
    ) -> Self {
        Self {
            worker_id,
            transport,
            record_types,
            timeout,
        }
    }

    async fn query(&self, fqdn: &str, record_type: &RecordType) -> Result<DnsResponse, DomainError> {
        let query = MessageBuilder::build_query(fqdn, record_type)?;
        let response = self.transport.send(&query.bytes, self.timeout).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.id != query.id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response id {} does not match query id {}",
                parsed.id, query.id
            )));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl ResolverClient for UdpResolverClient {
    #[instrument(skip(self, domain), fields(worker_id = self.worker_id, domain = %domain.fqdn()))]
    async fn resolve(&self, domain: &Domain) -> Result<Vec<DnsRecord>, DomainError> {
        let fqdn = domain.fqdn();
        let mut records = Vec::new();
        let mut failures = 0;
        let mut last_error = None;

        for record_type in self.record_types.iter() {
            match self.query(&fqdn, record_type).await {
                Ok(response) if response.is_nxdomain() => {
                    debug!("NXDOMAIN, skipping remaining record types");
                    return Ok(records);
                }
                Ok(response) if response.is_server_error() => {
                    let status = ResponseParser::rcode_to_status(response.rcode);
                    warn!(record_type = %record_type, status, "Upstream refused query");
                    failures += 1;
                    last_error = Some(DomainError::ResolutionFailed(format!(
                        "{} {} answered {}",
                        fqdn, record_type, status
                    )));
                }
                Ok(response) if response.is_nodata() && !response.truncated => {
                    debug!(record_type = %record_type, "NODATA");
                }
                Ok(response) => {
                    if response.truncated {
                        warn!(record_type = %record_type, "Truncated UDP response, keeping partial answers");
                    }
                    debug!(record_type = %record_type, answers = response.records.len(), "Query answered");
                    records.extend(response.records);
                }
                Err(e) => {
                    warn!(record_type = %record_type, error = %e, "Query failed");
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        if failures > 0 && failures == self.record_types.len() {
            return Err(last_error.unwrap_or_else(|| {
                DomainError::ResolutionFailed(format!("every query for {} failed", fqdn))
            }));
        }

        Ok(records)
    }
}
