//! Per-domain health checks.
//!
//! [`DomainChecker`] ties the record resolver, host mapper and reachability
//! prober together:
//! - Host existence: NS or MX host names mapped to IPv4 or IPv6 addresses
//! - Host reachability: the same mapping, with every host probed
//! - DNSSEC: signature records, address validation, or both

use std::sync::Arc;

use crate::address::AddressFamily;
use crate::config::CheckerConfig;
use crate::dns::{DnsBackend, HostMapper, LookupType, RecordResolver};
use crate::error_handling::DnsCheckError;
use crate::models::{
    AnswerRecordSet, CheckResponse, DnssecPosture, HostAddressMap, HostGroup,
    HostReachabilityReport, SignatureBundle, ValidationResult,
};
use crate::reach::ReachabilityProber;

/// A check that [`DomainChecker::check`] can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Records of one type
    Records(LookupType),
    /// Whether a group's hosts have addresses of a family
    HostAddresses(HostGroup, AddressFamily),
    /// Whether a group's hosts answer on their service ports or to ping
    HostReachability(HostGroup, AddressFamily),
    DnssecSignatures,
    DnssecValidation,
    Dnssec,
}

/// Runs health checks against domains.
///
/// Cheap to clone; clones share the resolver contexts.
#[derive(Clone)]
pub struct DomainChecker {
    resolver: RecordResolver,
    mapper: HostMapper,
    prober: ReachabilityProber,
}

impl DomainChecker {
    /// Creates a checker on `backend`, taking the address selection and
    /// compression policies from `config`.
    pub fn new(
        backend: Arc<dyn DnsBackend>,
        prober: ReachabilityProber,
        config: &CheckerConfig,
    ) -> Self {
        let resolver = RecordResolver::new(backend).with_compression(config.compression);
        let mapper = HostMapper::new(resolver.clone()).with_selection(config.address_selection);
        Self {
            resolver,
            mapper,
            prober,
        }
    }

    pub fn resolver(&self) -> &RecordResolver {
        &self.resolver
    }

    pub fn prober(&self) -> &ReachabilityProber {
        &self.prober
    }

    pub async fn records(
        &self,
        domain: &str,
        lookup: LookupType,
    ) -> Result<AnswerRecordSet, DnsCheckError> {
        self.resolver.resolve(domain, lookup).await
    }

    /// Maps the group's host names to addresses of `family`.
    ///
    /// # Errors
    ///
    /// See [`HostMapper::get_mapping`].
    pub async fn host_addresses(
        &self,
        domain: &str,
        group: HostGroup,
        family: AddressFamily,
    ) -> Result<HostAddressMap, DnsCheckError> {
        self.mapper.get_mapping(domain, group, family).await
    }

    /// Maps the group's hosts and probes each one with ping and a connect to
    /// the group's service ports.
    ///
    /// # Errors
    ///
    /// Only the host mapping can fail; probe failures are negative results.
    pub async fn host_reachability(
        &self,
        domain: &str,
        group: HostGroup,
        family: AddressFamily,
    ) -> Result<HostReachabilityReport, DnsCheckError> {
        let map = self.host_addresses(domain, group, family).await?;
        Ok(self.prober.probe_group(&map, &[], true).await)
    }

    pub async fn dnssec_signatures(&self, domain: &str) -> SignatureBundle {
        self.resolver.assemble_signatures(domain).await
    }

    pub async fn dnssec_validation(&self, domain: &str) -> ValidationResult {
        self.resolver.validate_address(domain).await
    }

    pub async fn dnssec(&self, domain: &str) -> DnssecPosture {
        self.resolver.comprehensive_dnssec(domain).await
    }

    /// Runs one check and wraps its result.
    pub async fn check(&self, domain: &str, check: Check) -> Result<CheckResponse, DnsCheckError> {
        log::debug!("Running {check:?} for {domain}");
        let response: CheckResponse = match check {
            Check::Records(lookup) => self.records(domain, lookup).await?.into(),
            Check::HostAddresses(group, family) => {
                self.host_addresses(domain, group, family).await?.into()
            }
            Check::HostReachability(group, family) => {
                self.host_reachability(domain, group, family).await?.into()
            }
            Check::DnssecSignatures => self.dnssec_signatures(domain).await.into(),
            Check::DnssecValidation => self.dnssec_validation(domain).await.into(),
            Check::Dnssec => self.dnssec(domain).await.into(),
        };
        Ok(response)
    }
}
