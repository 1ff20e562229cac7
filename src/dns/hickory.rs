//! [`DnsBackend`] implementation on `hickory-resolver`.
//!
//! Two resolvers are built from the same upstream configuration: a plain one
//! and one with DNSSEC validation enabled. Both are shared read-only for the
//! lifetime of the checker.

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::rr::{RData, Record, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::dns::backend::{DnsBackend, QueryType, RawResponse, RecordData, ResolverContext};
use crate::error_handling::DnsCheckError;

/// Production DNS backend holding a plain and a validating resolver.
pub struct HickoryBackend {
    plain: TokioAsyncResolver,
    validating: TokioAsyncResolver,
}

impl HickoryBackend {
    /// Builds both resolver contexts from one upstream configuration.
    ///
    /// The validating context uses the root trust anchor compiled into
    /// `hickory-proto`. Response caching is disabled on both contexts so that
    /// every check observes the live state of the zone.
    pub fn new(config: ResolverConfig, mut opts: ResolverOpts) -> Self {
        opts.cache_size = 0;
        // Names are always queried as given, never with search domains appended
        opts.ndots = 0;

        let mut validating_opts = opts.clone();
        validating_opts.validate = true;
        validating_opts.edns0 = true;
        opts.validate = false;

        Self {
            plain: TokioAsyncResolver::tokio(config.clone(), opts),
            validating: TokioAsyncResolver::tokio(config, validating_opts),
        }
    }

    fn resolver(&self, context: ResolverContext) -> &TokioAsyncResolver {
        match context {
            ResolverContext::Plain => &self.plain,
            ResolverContext::Validating => &self.validating,
        }
    }

    async fn lookup(
        &self,
        context: ResolverContext,
        name: &str,
        query_type: QueryType,
    ) -> Result<Option<Vec<Record>>, ResolveError> {
        match self
            .resolver(context)
            .lookup(name, record_type(query_type))
            .await
        {
            Ok(lookup) => Ok(Some(lookup.records().to_vec())),
            Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl DnsBackend for HickoryBackend {
    async fn query(
        &self,
        context: ResolverContext,
        name: &str,
        query_type: QueryType,
    ) -> Result<RawResponse, DnsCheckError> {
        log::debug!("Querying {query_type} for {name} ({context:?})");

        match self.lookup(context, name, query_type).await {
            Ok(Some(records)) => Ok(answered(context, &records, query_type)),
            Ok(None) => Ok(RawResponse::empty()),
            Err(e) => match validation_failure(context, &e) {
                Some(failure) => {
                    // The validating resolver drops answers it cannot verify.
                    // Fetch the data unvalidated and carry the verdict alongside.
                    log::debug!("DNSSEC validation of {query_type} for {name} failed: {e}");
                    let records = self
                        .lookup(ResolverContext::Plain, name, query_type)
                        .await
                        .map_err(|e| DnsCheckError::resolve(name, query_type, e))?
                        .unwrap_or_default();
                    Ok(RawResponse {
                        secure: false,
                        bogus: failure == ValidationFailure::Bogus,
                        records: convert_records(&records, query_type),
                    })
                }
                None => Err(DnsCheckError::resolve(name, query_type, e)),
            },
        }
    }
}

/// Builds the response for an answer that came back without error.
///
/// The validating handle strips every RRset it cannot verify before the answer
/// reaches us, so anything left in a validating answer is verified.
fn answered(context: ResolverContext, records: &[Record], query_type: QueryType) -> RawResponse {
    RawResponse {
        secure: context == ResolverContext::Validating && !records.is_empty(),
        bogus: false,
        records: convert_records(records, query_type),
    }
}

/// Why a validating lookup produced no verified answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationFailure {
    /// The zone carries no signatures for the record set
    Unsigned,
    /// Signatures are present but do not verify
    Bogus,
}

/// Classifies a validating-context error. Transport and protocol failures
/// return `None` and stay fatal for the query.
fn validation_failure(context: ResolverContext, e: &ResolveError) -> Option<ValidationFailure> {
    if context != ResolverContext::Validating {
        return None;
    }
    let ResolveErrorKind::Proto(proto) = e.kind() else {
        return None;
    };
    match proto.kind() {
        ProtoErrorKind::RrsigsNotPresent { .. } => Some(ValidationFailure::Unsigned),
        // Raised when the answer holds no record set to check at all
        ProtoErrorKind::Message("no results to verify") => Some(ValidationFailure::Unsigned),
        // The DNSSEC handle reports signature, key and denial failures as messages
        ProtoErrorKind::Message(_) | ProtoErrorKind::Msg(_) => Some(ValidationFailure::Bogus),
        _ => None,
    }
}

fn record_type(query_type: QueryType) -> RecordType {
    match query_type {
        QueryType::A => RecordType::A,
        QueryType::Aaaa => RecordType::AAAA,
        QueryType::Ns => RecordType::NS,
        QueryType::Mx => RecordType::MX,
        QueryType::Soa => RecordType::SOA,
        QueryType::Dnskey => RecordType::DNSKEY,
        QueryType::Rrsig => RecordType::RRSIG,
        QueryType::Nsec => RecordType::NSEC,
        QueryType::Ds => RecordType::DS,
    }
}

/// Keeps the records of the queried type (dropping CNAME links and the like)
/// and converts their data.
fn convert_records(records: &[Record], query_type: QueryType) -> Vec<RecordData> {
    let wanted = record_type(query_type);
    records
        .iter()
        .filter(|r| r.record_type() == wanted)
        .filter_map(|r| r.data())
        .map(convert_rdata)
        .collect()
}

fn convert_rdata(rdata: &RData) -> RecordData {
    match rdata {
        RData::A(a) => RecordData::Ipv4(a.0),
        RData::AAAA(aaaa) => RecordData::Ipv6Octets(aaaa.0.octets().to_vec()),
        RData::NS(ns) => RecordData::Name(ns.to_utf8()),
        RData::MX(mx) => RecordData::Exchange {
            preference: mx.preference(),
            exchange: mx.exchange().to_utf8(),
        },
        other => RecordData::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::error::ProtoError;
    use hickory_resolver::proto::rr::rdata::{A, NS};
    use hickory_resolver::proto::rr::Name;
    use std::io;
    use std::net::Ipv4Addr;

    fn proto_error(kind: ProtoErrorKind) -> ResolveError {
        ResolveError::from(ProtoError::from(kind))
    }

    fn name(text: &str) -> Name {
        Name::from_ascii(text).unwrap()
    }

    #[test]
    fn test_missing_signatures_mean_unsigned_zone() {
        let e = proto_error(ProtoErrorKind::RrsigsNotPresent {
            name: name("example.com."),
            record_type: RecordType::A,
        });
        assert_eq!(
            validation_failure(ResolverContext::Validating, &e),
            Some(ValidationFailure::Unsigned)
        );
    }

    #[test]
    fn test_failed_verification_is_bogus() {
        for e in [
            proto_error(ProtoErrorKind::Message("validation failed")),
            proto_error(ProtoErrorKind::Message("Could not validate all DNSKEYs")),
            proto_error(ProtoErrorKind::Msg("could not validate negative response".into())),
        ] {
            assert_eq!(
                validation_failure(ResolverContext::Validating, &e),
                Some(ValidationFailure::Bogus),
                "{e}"
            );
        }
    }

    #[test]
    fn test_transport_errors_stay_fatal() {
        let refused = proto_error(ProtoErrorKind::Io(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert_eq!(validation_failure(ResolverContext::Validating, &refused), None);
        let busy = proto_error(ProtoErrorKind::Busy);
        assert_eq!(validation_failure(ResolverContext::Validating, &busy), None);

        let timeout = ResolveError::from(ResolveErrorKind::Timeout);
        assert_eq!(validation_failure(ResolverContext::Validating, &timeout), None);
        let no_connections = ResolveError::from(ResolveErrorKind::NoConnections);
        assert_eq!(validation_failure(ResolverContext::Validating, &no_connections), None);
    }

    #[test]
    fn test_plain_context_never_reports_validation_failure() {
        let e = proto_error(ProtoErrorKind::Message("validation failed"));
        assert_eq!(validation_failure(ResolverContext::Plain, &e), None);
    }

    #[test]
    fn test_validating_answer_is_secure() {
        let records = vec![Record::from_rdata(
            name("example.com."),
            300,
            RData::A(A(Ipv4Addr::new(192, 0, 2, 1))),
        )];

        let response = answered(ResolverContext::Validating, &records, QueryType::A);
        assert!(response.secure);
        assert!(!response.bogus);
        assert_eq!(response.records, vec![RecordData::Ipv4(Ipv4Addr::new(192, 0, 2, 1))]);

        let response = answered(ResolverContext::Plain, &records, QueryType::A);
        assert!(!response.secure);
        assert!(!response.bogus);
    }

    #[test]
    fn test_other_record_types_are_dropped() {
        let records = vec![
            Record::from_rdata(name("example.com."), 300, RData::NS(NS(name("ns1.example.net.")))),
            Record::from_rdata(name("example.com."), 300, RData::A(A(Ipv4Addr::new(192, 0, 2, 7)))),
        ];
        let response = answered(ResolverContext::Plain, &records, QueryType::Ns);
        assert_eq!(response.records, vec![RecordData::Name("ns1.example.net.".into())]);
    }
}
