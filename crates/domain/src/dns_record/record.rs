use super::RecordType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One resolved DNS record.
///
/// `data` is the presentation form of the RDATA (`192.0.2.1`,
/// `10 mx.example.com.`, ...). The dispatcher never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Owner name
    pub name: Arc<str>,
    pub record_type: RecordType,
    /// Time to live in seconds
    pub ttl: u32,
    pub data: Arc<str>,
}

impl DnsRecord {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        ttl: u32,
        data: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data: data.into(),
        }
    }
}
