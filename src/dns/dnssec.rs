//! DNSSEC signature and validation assembly.

use crate::dns::records::RecordResolver;
use crate::models::{DnssecPosture, SignatureBundle, ValidationResult};

/// Folds the DNSSEC fetches of a [`RecordResolver`] into result shapes.
pub struct DnssecAssembler<'a> {
    resolver: &'a RecordResolver,
}

impl<'a> DnssecAssembler<'a> {
    pub fn new(resolver: &'a RecordResolver) -> Self {
        Self { resolver }
    }

    /// Fetches DNSKEY, RRSIG, NSEC, DS and SOA records concurrently.
    ///
    /// Each field of the bundle is absent where its type has no records or
    /// its fetch failed.
    pub async fn signatures(&self, domain: &str) -> SignatureBundle {
        let (dnskey, rrsig, nsec, ds, soa) = tokio::join!(
            self.resolver.fetch_dnskey(domain),
            self.resolver.fetch_rrsig(domain),
            self.resolver.fetch_nsec(domain),
            self.resolver.fetch_ds(domain),
            self.resolver.fetch_soa(domain),
        );

        SignatureBundle {
            dnskey: dnskey.into_list(),
            rrsig: rrsig.into_list(),
            nsec: nsec.into_list(),
            ds: ds.into_list(),
            soa: soa.into_list(),
            ..SignatureBundle::empty(domain)
        }
    }

    pub async fn validation(&self, domain: &str) -> ValidationResult {
        self.resolver.validate_address(domain).await
    }

    /// Validation verdicts and signature records of `domain`.
    pub async fn posture(&self, domain: &str) -> DnssecPosture {
        let (validation, signatures) =
            tokio::join!(self.validation(domain), self.signatures(domain));
        DnssecPosture::new(validation, signatures)
    }

    /// `true` when `domain` has A records and all of them validate as secure.
    pub async fn fully_secure(&self, domain: &str) -> bool {
        self.validation(domain).await.fully_secure()
    }

    /// See [`ValidationResult::chain_intact`].
    pub async fn chain_intact(&self, domain: &str) -> Option<bool> {
        self.validation(domain).await.chain_intact()
    }
}

impl RecordResolver {
    /// Collects the DNSSEC records of `domain` into one bundle.
    pub async fn assemble_signatures(&self, domain: &str) -> SignatureBundle {
        DnssecAssembler::new(self).signatures(domain).await
    }

    /// Validates `domain`'s addresses and collects its DNSSEC records.
    pub async fn comprehensive_dnssec(&self, domain: &str) -> DnssecPosture {
        DnssecAssembler::new(self).posture(domain).await
    }
}
