use super::record_type_map::RecordTypeMapper;
use dnsdig_domain::{DnsRecord, DomainError};
use hickory_proto::op::{Message, ResponseCode};
use tracing::debug;

/// DNS header length in bytes.
const HEADER_LEN: usize = 12;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,
    pub rcode: ResponseCode,
    pub truncated: bool,
    /// Answer records of the types a dig reports, in wire order.
    pub records: Vec<DnsRecord>,
}

impl DnsResponse {
    pub fn is_nodata(&self) -> bool {
        self.rcode == ResponseCode::NoError && self.records.is_empty()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        if response_bytes.len() < HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response of {} bytes is shorter than a DNS header",
                response_bytes.len()
            )));
        }
        let id = u16::from_be_bytes([response_bytes[0], response_bytes[1]]);

        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let records: Vec<DnsRecord> = message
            .answers()
            .iter()
            .filter_map(|record| {
                let record_type = RecordTypeMapper::from_hickory(record.record_type())?;
                Some(DnsRecord::new(
                    record.name().to_utf8(),
                    record_type,
                    record.ttl(),
                    record.data().to_string(),
                ))
            })
            .collect();

        debug!(
            id,
            rcode = ?rcode,
            answers = records.len(),
            truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id,
            rcode,
            truncated,
            records,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
