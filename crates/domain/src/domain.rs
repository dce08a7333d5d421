use crate::{DomainError, Tld};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A registrable domain: a name under a known TLD.
///
/// The TLD is shared, not owned. Storage keeps only its id, and every
/// `Domain` built from the same row points at the same `Tld`.
/// `(name, tld.id)` is unique across the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub uuid: Uuid,
    pub name: Arc<str>,
    pub tld: Arc<Tld>,
}

impl Domain {
    /// Build a domain that has not been persisted yet, with a fresh identifier.
    pub fn new(name: impl Into<Arc<str>>, tld: Arc<Tld>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            tld,
        }
    }

    pub fn with_uuid(uuid: Uuid, name: impl Into<Arc<str>>, tld: Arc<Tld>) -> Self {
        Self {
            uuid,
            name: name.into(),
            tld,
        }
    }

    /// Fully qualified name, e.g. `google.co.uk`.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.name, self.tld.name)
    }

    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "Domain name cannot be empty".to_string(),
            ));
        }
        if name.len() > 63 {
            return Err(DomainError::InvalidDomainName(format!(
                "Label '{}' exceeds 63 characters",
                name
            )));
        }
        if name.starts_with('-') || name.ends_with('-') {
            return Err(DomainError::InvalidDomainName(format!(
                "Label '{}' cannot start or end with a hyphen",
                name
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidDomainName(format!(
                "Label '{}' contains invalid characters",
                name
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} ({})", self.name, self.tld.name, self.uuid)
    }
}
