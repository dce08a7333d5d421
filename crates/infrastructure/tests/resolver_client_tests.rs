use dnsdig_application::ports::{ResolverClient, ResolverFactory};
use dnsdig_domain::{Domain, DomainError, RecordType, Tld};
use dnsdig_infrastructure::dns::transport::UdpTransport;
use dnsdig_infrastructure::dns::{UdpResolverClient, UdpResolverFactory};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{MockBehavior, MockDnsServer};

fn example() -> Domain {
    Domain::new("example", Arc::new(Tld::new(1, "com")))
}

fn client(server: &MockDnsServer, record_types: Vec<RecordType>) -> UdpResolverClient {
    UdpResolverClient::new(
        0,
        Box::new(UdpTransport::new(server.addr())),
        record_types.into(),
        Duration::from_millis(200),
    )
}

#[tokio::test]
async fn test_dig_collects_answers_across_types() {
    // Arrange - A is answered, AAAA and MX are NODATA
    let server = MockDnsServer::start(MockBehavior::Answer).await.unwrap();
    let client = client(
        &server,
        vec![RecordType::A, RecordType::AAAA, RecordType::MX],
    );

    // Act
    let records = client.resolve(&example()).await.unwrap();

    // Assert
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_type, RecordType::A);
    assert_eq!(&*records[0].data, "93.184.216.34");
    assert_eq!(server.query_count(), 3);
}

#[tokio::test]
async fn test_nodata_everywhere_is_empty_not_an_error() {
    // Arrange - only A is answered
    let server = MockDnsServer::start(MockBehavior::Answer).await.unwrap();
    let client = client(&server, vec![RecordType::AAAA, RecordType::MX]);

    // Act
    let records = client.resolve(&example()).await.unwrap();

    // Assert - both types asked, neither answered
    assert!(records.is_empty());
    assert_eq!(server.query_count(), 2);
}

#[tokio::test]
async fn test_nxdomain_is_empty_and_stops_early() {
    let server = MockDnsServer::start(MockBehavior::NxDomain).await.unwrap();
    let client = client(&server, vec![RecordType::A, RecordType::AAAA, RecordType::NS]);

    let records = client.resolve(&example()).await.unwrap();

    assert!(records.is_empty());
    assert_eq!(server.query_count(), 1);
}

#[tokio::test]
async fn test_silent_upstream_fails_the_dig() {
    let server = MockDnsServer::start(MockBehavior::Silent).await.unwrap();
    let client = UdpResolverClient::new(
        0,
        Box::new(UdpTransport::new(server.addr())),
        vec![RecordType::A, RecordType::AAAA].into(),
        Duration::from_millis(50),
    );

    let result = client.resolve(&example()).await;

    assert!(matches!(result, Err(DomainError::ResolutionFailed(_))));
}

#[tokio::test]
async fn test_mismatched_id_is_rejected() {
    let server = MockDnsServer::start(MockBehavior::WrongId).await.unwrap();
    let client = client(&server, vec![RecordType::A]);

    let result = client.resolve(&example()).await;

    assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
}

#[tokio::test]
async fn test_servfail_everywhere_fails_the_dig() {
    let server = MockDnsServer::start(MockBehavior::ServFail).await.unwrap();
    let client = client(&server, vec![RecordType::A, RecordType::TXT]);

    let result = client.resolve(&example()).await;

    assert!(matches!(result, Err(DomainError::ResolutionFailed(_))));
    assert_eq!(server.query_count(), 2);
}

#[tokio::test]
async fn test_factory_builds_independent_clients() {
    // Arrange
    let server = MockDnsServer::start(MockBehavior::Answer).await.unwrap();
    let factory = UdpResolverFactory::new(
        server.addr(),
        vec![RecordType::A],
        Duration::from_millis(200),
    );

    // Act
    let first = factory.create(0);
    let second = factory.create(1);
    let (domain_a, domain_b) = (example(), example());
    let (a, b) = tokio::join!(first.resolve(&domain_a), second.resolve(&domain_b));

    // Assert
    assert_eq!(a.unwrap().len(), 1);
    assert_eq!(b.unwrap().len(), 1);
    assert_eq!(server.query_count(), 2);
}

#[test]
fn test_factory_rejects_bad_upstream() {
    let config = dnsdig_domain::config::ResolverConfig {
        upstream: "not-an-address".to_string(),
        ..Default::default()
    };

    assert!(UdpResolverFactory::from_config(&config).is_err());
}
