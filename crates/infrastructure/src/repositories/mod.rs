pub mod domain_repository;
pub mod tld_repository;

pub use domain_repository::SqliteDomainRepository;
pub use tld_repository::SqliteTldRepository;
