//! DNS resolution and record querying.
//!
//! This module provides async DNS operations on top of a [`DnsBackend`]:
//! - Plain resolution of A, AAAA, NS, MX and SOA records
//! - DNSSEC record fetches (DNSKEY, RRSIG, NSEC, DS, SOA) and validation
//! - Host mapping: NS/MX host names joined with their addresses
//!
//! The production backend is [`HickoryBackend`], built on `hickory-resolver`.

mod backend;
mod dnssec;
mod hickory;
mod mapping;
mod records;

// Re-export public API
pub use backend::{DnsBackend, LookupType, QueryType, RawResponse, RecordData, ResolverContext};
pub use dnssec::DnssecAssembler;
pub use hickory::HickoryBackend;
pub use mapping::{AddressSelection, HostMapper};
pub use records::RecordResolver;

#[cfg(test)]
pub(crate) mod test_helpers;
