mod domain_registry;
mod resolver_client;
mod tld_detector;
mod tld_repository;

pub use domain_registry::{DomainFilter, DomainRegistry};
pub use resolver_client::{ResolverClient, ResolverFactory};
pub use tld_detector::{DetectedDomain, TldDetector};
pub use tld_repository::TldRepository;
