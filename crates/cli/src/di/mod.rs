use dnsdig_application::ports::{DomainRegistry, ResolverFactory, TldDetector};
use dnsdig_application::services::{CachedDomainRegistry, LookupCache};
use dnsdig_application::use_cases::ListDomainsUseCase;
use dnsdig_application::DigDispatcher;
use dnsdig_domain::Config;
use dnsdig_infrastructure::dns::UdpResolverFactory;
use dnsdig_infrastructure::repositories::{SqliteDomainRepository, SqliteTldRepository};
use dnsdig_infrastructure::tld::SuffixTldDetector;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

pub struct Repositories {
    pub domains: Arc<dyn DomainRegistry>,
    pub tlds: Arc<SqliteTldRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let sqlite: Arc<dyn DomainRegistry> = Arc::new(SqliteDomainRepository::new(pool.clone()));

        let domains: Arc<dyn DomainRegistry> = if config.cache.enabled {
            info!(
                capacity = config.cache.capacity,
                ttl_secs = ?config.cache.ttl_secs,
                "Registry lookup cache enabled"
            );
            Arc::new(CachedDomainRegistry::new(
                sqlite,
                LookupCache::new(config.cache.capacity, config.cache.ttl()),
            ))
        } else {
            sqlite
        };

        Self {
            domains,
            tlds: Arc::new(SqliteTldRepository::new(pool)),
        }
    }
}

/// Registry browsing. Always reads SQLite directly; the lookup cache has
/// nothing to offer a paged scan.
pub fn build_list_domains(pool: SqlitePool) -> ListDomainsUseCase {
    ListDomainsUseCase::new(Arc::new(SqliteDomainRepository::new(pool)))
}

/// Builds the dispatcher over the SQLite registry, the suffix detector and
/// UDP resolvers. The dispatcher is returned idle.
pub async fn build_dispatcher(pool: SqlitePool, config: &Config) -> anyhow::Result<DigDispatcher> {
    let repos = Repositories::new(pool, config);

    let detector: Arc<dyn TldDetector> =
        Arc::new(SuffixTldDetector::from_repository(repos.tlds.as_ref()).await?);

    let resolvers = UdpResolverFactory::from_config(&config.resolver)?;
    info!(upstream = %resolvers.upstream(), "Resolver factory ready");
    let resolvers: Arc<dyn ResolverFactory> = Arc::new(resolvers);

    Ok(DigDispatcher::new(
        &config.dispatcher,
        resolvers,
        repos.domains,
        detector,
    ))
}
