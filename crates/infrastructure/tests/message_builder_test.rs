use dnsdig_domain::RecordType;
use dnsdig_infrastructure::dns::forwarding::{MessageBuilder, ResponseParser};

mod helpers;
use helpers::{MockBehavior, MockDnsServer, MOCK_TTL};

// ============================================================================
// Query Building Tests
// ============================================================================

#[test]
fn test_build_a_query() {
    let query = MessageBuilder::build_query("google.com", &RecordType::A).unwrap();

    // DNS header is always 12 bytes, plus question section
    assert!(query.bytes.len() > 12);

    // Byte 2: QR(1) + Opcode(4) + AA(1) + TC(1) + RD(1)
    assert_eq!(query.bytes[2] & 0x01, 0x01, "RD flag should be set");
    assert_eq!(query.bytes[2] & 0x80, 0x00, "QR flag should be clear");
}

#[test]
fn test_wire_id_matches_returned_id() {
    let query = MessageBuilder::build_query("test.com", &RecordType::A).unwrap();

    let wire_id = u16::from_be_bytes([query.bytes[0], query.bytes[1]]);
    assert_eq!(wire_id, query.id);
}

#[test]
fn test_explicit_id() {
    let query = MessageBuilder::build_query_with_id("test.com", &RecordType::MX, 0xbeef).unwrap();

    assert_eq!(query.id, 0xbeef);
    assert_eq!(query.bytes[0..2], [0xbe, 0xef]);
}

#[test]
fn test_query_ids_vary() {
    let ids: std::collections::HashSet<u16> = (0..100)
        .map(|_| MessageBuilder::build_query("test.com", &RecordType::A).unwrap().id)
        .collect();

    // 16-bit ids: collisions possible but rare for 100
    assert!(ids.len() > 50, "Should generate varied IDs");
}

#[test]
fn test_single_question_with_requested_type() {
    let query = MessageBuilder::build_query("example.com", &RecordType::AAAA).unwrap();
    let bytes = &query.bytes;

    let qdcount = u16::from_be_bytes([bytes[4], bytes[5]]);
    assert_eq!(qdcount, 1);

    // 7"example" 3"com" 0, then QTYPE and QCLASS
    let qname_end = 12 + 1 + 7 + 1 + 3 + 1;
    let qtype = u16::from_be_bytes([bytes[qname_end], bytes[qname_end + 1]]);
    let qclass = u16::from_be_bytes([bytes[qname_end + 2], bytes[qname_end + 3]]);
    assert_eq!(qtype, 28, "AAAA is type 28");
    assert_eq!(qclass, 1, "class IN");
}

#[test]
fn test_all_dig_types_build() {
    for rt in [
        RecordType::A,
        RecordType::AAAA,
        RecordType::CNAME,
        RecordType::MX,
        RecordType::NS,
        RecordType::SOA,
        RecordType::TXT,
        RecordType::SRV,
        RecordType::CAA,
        RecordType::PTR,
    ] {
        let result = MessageBuilder::build_query("example.com", &rt);
        assert!(result.is_ok(), "Failed to build query for {:?}", rt);
    }
}

#[test]
fn test_oversized_label_rejected() {
    let domain = format!("{}.com", "a".repeat(64));
    assert!(MessageBuilder::build_query(&domain, &RecordType::A).is_err());
}

// ============================================================================
// Response Parsing Tests
// ============================================================================

#[test]
fn test_parse_a_answer() {
    let query = MessageBuilder::build_query("example.com", &RecordType::A).unwrap();
    let response = MockDnsServer::build_response(&query.bytes, MockBehavior::Answer).unwrap();

    let parsed = ResponseParser::parse(&response).unwrap();

    assert_eq!(parsed.id, query.id);
    assert!(!parsed.truncated);
    assert_eq!(parsed.records.len(), 1);

    let record = &parsed.records[0];
    assert_eq!(record.record_type, RecordType::A);
    assert_eq!(record.ttl, MOCK_TTL);
    assert_eq!(&*record.data, "93.184.216.34");
    assert_eq!(record.name.trim_end_matches('.'), "example.com");
}

#[test]
fn test_parse_nodata() {
    let query = MessageBuilder::build_query("example.com", &RecordType::MX).unwrap();
    let response = MockDnsServer::build_response(&query.bytes, MockBehavior::Answer).unwrap();

    let parsed = ResponseParser::parse(&response).unwrap();

    assert!(parsed.is_nodata());
    assert!(!parsed.is_nxdomain());
}

#[test]
fn test_parse_nxdomain_and_servfail() {
    let query = MessageBuilder::build_query("missing.com", &RecordType::A).unwrap();

    let nx = MockDnsServer::build_response(&query.bytes, MockBehavior::NxDomain).unwrap();
    let nx = ResponseParser::parse(&nx).unwrap();
    assert!(nx.is_nxdomain());
    assert_eq!(ResponseParser::rcode_to_status(nx.rcode), "NXDOMAIN");

    let fail = MockDnsServer::build_response(&query.bytes, MockBehavior::ServFail).unwrap();
    let fail = ResponseParser::parse(&fail).unwrap();
    assert!(fail.is_server_error());
}

#[test]
fn test_parse_rejects_short_input() {
    assert!(ResponseParser::parse(&[0x12, 0x34, 0x81]).is_err());
}
