//! Single-type DNS queries normalized into answer record sets.
//!
//! This module provides:
//! - Plain resolution of A, AAAA, NS, MX and SOA records (failures are fatal)
//! - DNSSEC record fetches on the validating context (failures are soft)
//! - Per-address DNSSEC validation verdicts

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::address::{ipv6_to_text_with, is_valid_ipv6, AddressFamily, CompressionPolicy};
use crate::dns::backend::{
    DnsBackend, LookupType, QueryType, RawResponse, RecordData, ResolverContext,
};
use crate::error_handling::DnsCheckError;
use crate::models::{AnswerRecordSet, SecurityStatus, ValidationResult};

/// Issues DNS queries through a [`DnsBackend`] and renders the answers.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct RecordResolver {
    backend: Arc<dyn DnsBackend>,
    compression: CompressionPolicy,
}

impl RecordResolver {
    /// Creates a resolver with the default IPv6 compression policy.
    pub fn new(backend: Arc<dyn DnsBackend>) -> Self {
        Self {
            backend,
            compression: CompressionPolicy::default(),
        }
    }

    /// Sets the compression policy used to render AAAA answers.
    pub fn with_compression(mut self, compression: CompressionPolicy) -> Self {
        self.compression = compression;
        self
    }

    /// Resolves `domain` on the plain context.
    ///
    /// # Arguments
    ///
    /// * `domain` - The name to query
    /// * `lookup` - The record type to query
    ///
    /// # Returns
    ///
    /// The rendered answers keyed by their position in the response, with an
    /// absent answer when no record matched.
    ///
    /// # Errors
    ///
    /// Returns [`DnsCheckError::Resolve`] when the resolver reports a failure
    /// status. The query is not retried.
    pub async fn resolve(
        &self,
        domain: &str,
        lookup: LookupType,
    ) -> Result<AnswerRecordSet, DnsCheckError> {
        let query_type = QueryType::from(lookup);
        let response = self
            .backend
            .query(ResolverContext::Plain, domain, query_type)
            .await?;
        Ok(self.render(domain, query_type, response))
    }

    pub async fn a(&self, domain: &str) -> Result<AnswerRecordSet, DnsCheckError> {
        self.resolve(domain, LookupType::A).await
    }

    pub async fn aaaa(&self, domain: &str) -> Result<AnswerRecordSet, DnsCheckError> {
        self.resolve(domain, LookupType::Aaaa).await
    }

    pub async fn ns(&self, domain: &str) -> Result<AnswerRecordSet, DnsCheckError> {
        self.resolve(domain, LookupType::Ns).await
    }

    /// MX exchanges, ordered by preference.
    pub async fn mx(&self, domain: &str) -> Result<AnswerRecordSet, DnsCheckError> {
        self.resolve(domain, LookupType::Mx).await
    }

    pub async fn soa(&self, domain: &str) -> Result<AnswerRecordSet, DnsCheckError> {
        self.resolve(domain, LookupType::Soa).await
    }

    /// Address records of `domain` for one family.
    pub async fn addresses(
        &self,
        domain: &str,
        family: AddressFamily,
    ) -> Result<AnswerRecordSet, DnsCheckError> {
        match family {
            AddressFamily::V4 => self.a(domain).await,
            AddressFamily::V6 => self.aaaa(domain).await,
        }
    }

    pub async fn fetch_dnskey(&self, domain: &str) -> AnswerRecordSet {
        self.fetch_signed(domain, QueryType::Dnskey).await
    }

    pub async fn fetch_rrsig(&self, domain: &str) -> AnswerRecordSet {
        self.fetch_signed(domain, QueryType::Rrsig).await
    }

    pub async fn fetch_nsec(&self, domain: &str) -> AnswerRecordSet {
        self.fetch_signed(domain, QueryType::Nsec).await
    }

    pub async fn fetch_ds(&self, domain: &str) -> AnswerRecordSet {
        self.fetch_signed(domain, QueryType::Ds).await
    }

    /// SOA records of `domain`, reported only when the response validated as
    /// secure.
    pub async fn fetch_soa(&self, domain: &str) -> AnswerRecordSet {
        match self.query_validating(domain, QueryType::Soa).await {
            Some(response) if response.secure => self.render(domain, QueryType::Soa, response),
            Some(_) => {
                log::debug!("SOA of {domain} did not validate as secure");
                AnswerRecordSet::empty(domain, QueryType::Soa.into())
            }
            None => AnswerRecordSet::empty(domain, QueryType::Soa.into()),
        }
    }

    /// Validates the A records of `domain`.
    ///
    /// A single query is issued on the validating context. The DNSSEC verdict
    /// belongs to the response, so every address in it receives the same
    /// status. The answer is absent when there are no A records or the query
    /// failed.
    pub async fn validate_address(&self, domain: &str) -> ValidationResult {
        let Some(response) = self.query_validating(domain, QueryType::A).await else {
            return ValidationResult::new(domain, BTreeMap::new());
        };

        let status = SecurityStatus::from_flags(response.secure, response.bogus);
        let verdicts = response
            .records
            .iter()
            .filter_map(|record| match record {
                RecordData::Ipv4(address) => Some((address.to_string(), status)),
                _ => None,
            })
            .collect();
        ValidationResult::new(domain, verdicts)
    }

    async fn fetch_signed(&self, domain: &str, query_type: QueryType) -> AnswerRecordSet {
        match self.query_validating(domain, query_type).await {
            Some(response) => self.render(domain, query_type, response),
            None => AnswerRecordSet::empty(domain, query_type.into()),
        }
    }

    /// Queries the validating context, turning failures into `None`.
    async fn query_validating(&self, domain: &str, query_type: QueryType) -> Option<RawResponse> {
        match self
            .backend
            .query(ResolverContext::Validating, domain, query_type)
            .await
        {
            Ok(response) => Some(response),
            Err(e) => {
                log::warn!("DNSSEC lookup of {query_type} for {domain} failed: {e}");
                None
            }
        }
    }

    fn render(&self, domain: &str, query_type: QueryType, response: RawResponse) -> AnswerRecordSet {
        let mut records = response.records;
        if query_type == QueryType::Mx {
            // Stable, so equal preferences keep response order
            records.sort_by_key(|record| match record {
                RecordData::Exchange { preference, .. } => *preference,
                _ => u16::MAX,
            });
        }

        let entries: BTreeMap<usize, String> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.render_value(domain, record).map(|value| (index, value))
            })
            .collect();
        AnswerRecordSet::new(domain, query_type.into(), entries)
    }

    fn render_value(&self, domain: &str, record: RecordData) -> Option<String> {
        match record {
            RecordData::Ipv4(address) => Some(address.to_string()),
            RecordData::Ipv6Octets(octets) => {
                if !is_valid_ipv6(&octets) {
                    log::warn!(
                        "Skipping AAAA record of {domain} with {} bytes of address data",
                        octets.len()
                    );
                    return None;
                }
                ipv6_to_text_with(&octets, self.compression).ok()
            }
            RecordData::Name(name) => Some(name),
            RecordData::Exchange { exchange, .. } => Some(exchange),
            RecordData::Text(text) => Some(text),
        }
    }
}
