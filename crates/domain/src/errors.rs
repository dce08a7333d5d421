use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unable to detect domain and TLD: {0}")]
    DetectionFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unable to persist domain: {0}")]
    PersistenceFailed(String),

    #[error("Resolution failed: {0}")]
    ResolutionFailed(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Dispatcher is closed")]
    DispatcherClosed,

    #[error("Dispatcher already started")]
    AlreadyStarted,
}
