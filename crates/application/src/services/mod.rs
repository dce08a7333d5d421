mod cached_domain_registry;
mod lookup_cache;

pub use cached_domain_registry::CachedDomainRegistry;
pub use lookup_cache::{LookupCache, LookupCacheStats, LookupKey};
