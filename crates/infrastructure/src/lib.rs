//! dnsdig Infrastructure Layer
//!
//! Adapters for the application ports: SQLite-backed registry and TLD
//! tables, the suffix-trie TLD detector and the UDP resolver client.
pub mod database;
pub mod dns;
pub mod repositories;
pub mod tld;
