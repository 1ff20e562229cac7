//! The query interface between the record resolver and a DNS library.
//!
//! The resolver library answers one question per call: the records of one type
//! for one name, along with the DNSSEC verdict of the response. Everything
//! above this layer (rendering, joining, folding into result shapes) is
//! written against [`DnsBackend`] so it can run on a scripted backend in tests.

use std::fmt;
use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::error_handling::DnsCheckError;

/// Record types the checker queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    A,
    Aaaa,
    Ns,
    Mx,
    Soa,
    Dnskey,
    Rrsig,
    Nsec,
    Ds,
}

impl QueryType {
    /// The record type mnemonic in upper case.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::A => "A",
            QueryType::Aaaa => "AAAA",
            QueryType::Ns => "NS",
            QueryType::Mx => "MX",
            QueryType::Soa => "SOA",
            QueryType::Dnskey => "DNSKEY",
            QueryType::Rrsig => "RRSIG",
            QueryType::Nsec => "NSEC",
            QueryType::Ds => "DS",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record types accepted by plain (non-validating) resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupType {
    A,
    Aaaa,
    Ns,
    Mx,
    Soa,
}

impl From<LookupType> for QueryType {
    fn from(lookup: LookupType) -> Self {
        match lookup {
            LookupType::A => QueryType::A,
            LookupType::Aaaa => QueryType::Aaaa,
            LookupType::Ns => QueryType::Ns,
            LookupType::Mx => QueryType::Mx,
            LookupType::Soa => QueryType::Soa,
        }
    }
}

/// Which resolver context answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverContext {
    /// Ordinary recursive resolution, no DNSSEC validation
    Plain,
    /// DNSSEC-validating resolution against the root trust anchor
    Validating,
}

/// Data of a single answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// A record
    Ipv4(Ipv4Addr),
    /// AAAA record as raw octets, exactly as carried on the wire
    Ipv6Octets(Vec<u8>),
    /// NS record target
    Name(String),
    /// MX record
    Exchange { preference: u16, exchange: String },
    /// Any other record in presentation format
    Text(String),
}

/// Records of one type returned for one query.
///
/// `secure` and `bogus` are only meaningful for the validating context; the
/// plain context always reports both as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub secure: bool,
    pub bogus: bool,
    pub records: Vec<RecordData>,
}

impl RawResponse {
    /// A response with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An unvalidated response carrying `records`.
    pub fn plain(records: Vec<RecordData>) -> Self {
        Self {
            secure: false,
            bogus: false,
            records,
        }
    }
}

/// A DNS library capable of answering single-type queries.
///
/// "No records" (NODATA or NXDOMAIN) is an empty [`RawResponse`], not an
/// error. Any other failure status is reported as
/// [`DnsCheckError::Resolve`].
#[async_trait]
pub trait DnsBackend: Send + Sync {
    /// Queries `name` for records of `query_type` on the given context.
    async fn query(
        &self,
        context: ResolverContext,
        name: &str,
        query_type: QueryType,
    ) -> Result<RawResponse, DnsCheckError>;
}
