// Shared test helpers: an in-memory DNS backend and loopback ports.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;

use domain_health::dns::{DnsBackend, QueryType, RawResponse, RecordData, ResolverContext};
use domain_health::reach::{PingMode, ReachabilityProber};
use domain_health::{CheckerConfig, DnsCheckError, DomainChecker};

/// DNS backend answering from a fixed table. Unscripted queries return no
/// records.
#[derive(Default)]
pub struct FakeDns {
    answers: HashMap<(ResolverContext, String, QueryType), Result<RawResponse, DnsCheckError>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl FakeDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ns(self, domain: &str, names: &[&str]) -> Self {
        let records = names
            .iter()
            .map(|name| RecordData::Name(name.to_string()))
            .collect();
        self.plain(domain, QueryType::Ns, records)
    }

    pub fn mx(self, domain: &str, exchanges: &[(u16, &str)]) -> Self {
        let records = exchanges
            .iter()
            .map(|(preference, exchange)| RecordData::Exchange {
                preference: *preference,
                exchange: exchange.to_string(),
            })
            .collect();
        self.plain(domain, QueryType::Mx, records)
    }

    pub fn a(self, name: &str, addresses: &[&str]) -> Self {
        let records = addresses
            .iter()
            .map(|a| RecordData::Ipv4(a.parse::<Ipv4Addr>().expect("valid IPv4 literal")))
            .collect();
        self.plain(name, QueryType::A, records)
    }

    pub fn plain(mut self, name: &str, query_type: QueryType, records: Vec<RecordData>) -> Self {
        self.answers.insert(
            (ResolverContext::Plain, name.to_string(), query_type),
            Ok(RawResponse::plain(records)),
        );
        self
    }

    pub fn validating(
        mut self,
        name: &str,
        query_type: QueryType,
        secure: bool,
        bogus: bool,
        records: Vec<RecordData>,
    ) -> Self {
        self.answers.insert(
            (ResolverContext::Validating, name.to_string(), query_type),
            Ok(RawResponse {
                secure,
                bogus,
                records,
            }),
        );
        self
    }

    pub fn failing(mut self, context: ResolverContext, name: &str, query_type: QueryType) -> Self {
        self.answers.insert(
            (context, name.to_string(), query_type),
            Err(DnsCheckError::resolve(name, query_type, "SERVFAIL")),
        );
        self
    }
}

#[async_trait]
impl DnsBackend for FakeDns {
    async fn query(
        &self,
        context: ResolverContext,
        name: &str,
        query_type: QueryType,
    ) -> Result<RawResponse, DnsCheckError> {
        self.answers
            .get(&(context, name.to_string(), query_type))
            .cloned()
            .unwrap_or_else(|| Ok(RawResponse::empty()))
    }
}

/// Creates a checker on `dns` that pings through the `ping` utility.
#[allow(dead_code)]
pub fn checker(dns: FakeDns) -> DomainChecker {
    let config = CheckerConfig {
        ping_mode: PingMode::Subprocess,
        ..Default::default()
    };
    DomainChecker::new(Arc::new(dns), ReachabilityProber::from_config(&config), &config)
}

/// Binds a loopback listener; the port stays open while the listener lives.
#[allow(dead_code)]
pub async fn open_port() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind loopback listener");
    let port = listener
        .local_addr()
        .expect("Listener has a local address")
        .port();
    (listener, port)
}

/// A loopback port nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> u16 {
    let (listener, port) = open_port().await;
    drop(listener);
    port
}
