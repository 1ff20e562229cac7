//! DNSSEC validation verdicts and signature bundles.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::RecordTag;

/// Validation verdict of a response, as reported by the validating resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityStatus {
    /// Signatures chain up to the trust anchor
    Secure,
    /// Signatures are present but fail validation
    Bogus,
    /// The zone is not signed (or not provably signed)
    Insecure,
}

impl SecurityStatus {
    /// Verdict from the resolver's `secure`/`bogus` response flags.
    pub fn from_flags(secure: bool, bogus: bool) -> Self {
        if secure {
            SecurityStatus::Secure
        } else if bogus {
            SecurityStatus::Bogus
        } else {
            SecurityStatus::Insecure
        }
    }
}

/// Per-address DNSSEC verdicts for a domain's A records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub domain: String,
    pub record_types: Vec<RecordTag>,
    /// Address to verdict, absent when the domain has no A records
    pub answer: Option<BTreeMap<String, SecurityStatus>>,
}

impl ValidationResult {
    pub fn new(domain: &str, verdicts: BTreeMap<String, SecurityStatus>) -> Self {
        Self {
            domain: domain.to_string(),
            record_types: vec![RecordTag::A, RecordTag::Dnssec],
            answer: if verdicts.is_empty() {
                None
            } else {
                Some(verdicts)
            },
        }
    }

    /// `true` when there is at least one address and every address is secure.
    pub fn fully_secure(&self) -> bool {
        match &self.answer {
            Some(verdicts) => verdicts.values().all(|s| *s == SecurityStatus::Secure),
            None => false,
        }
    }

    /// Whether the chain of trust holds.
    ///
    /// `Some(false)` as soon as any verdict is bogus, `Some(true)` when the
    /// remaining non-insecure verdicts are secure, `None` when every verdict
    /// is insecure (there is no chain to judge).
    pub fn chain_intact(&self) -> Option<bool> {
        let verdicts = self.answer.as_ref()?;
        if verdicts.values().any(|s| *s == SecurityStatus::Bogus) {
            return Some(false);
        }
        verdicts
            .values()
            .any(|s| *s == SecurityStatus::Secure)
            .then_some(true)
    }
}

/// DNSSEC-related records of a domain, one ordered list per type.
///
/// A field is absent when the domain has no record of that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureBundle {
    pub domain: String,
    pub record_types: Vec<RecordTag>,
    pub dnskey: Option<Vec<String>>,
    pub rrsig: Option<Vec<String>>,
    pub nsec: Option<Vec<String>>,
    pub ds: Option<Vec<String>>,
    pub soa: Option<Vec<String>>,
}

impl SignatureBundle {
    /// A bundle with every type absent.
    pub fn empty(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            record_types: vec![
                RecordTag::Dnskey,
                RecordTag::Rrsig,
                RecordTag::Nsec,
                RecordTag::Ds,
                RecordTag::Soa,
            ],
            dnskey: None,
            rrsig: None,
            nsec: None,
            ds: None,
            soa: None,
        }
    }

    /// `true` when the zone publishes keys and signatures.
    pub fn is_signed(&self) -> bool {
        self.dnskey.is_some() && self.rrsig.is_some()
    }
}

/// Combined validation verdicts and signature records of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnssecPosture {
    pub domain: String,
    pub record_types: Vec<RecordTag>,
    pub validation: ValidationResult,
    pub signatures: SignatureBundle,
}

impl DnssecPosture {
    pub fn new(validation: ValidationResult, signatures: SignatureBundle) -> Self {
        Self {
            domain: validation.domain.clone(),
            record_types: vec![
                RecordTag::A,
                RecordTag::Dnssec,
                RecordTag::Dnskey,
                RecordTag::Rrsig,
                RecordTag::Nsec,
                RecordTag::Ds,
                RecordTag::Soa,
            ],
            validation,
            signatures,
        }
    }

    /// `true` when every validated address is secure.
    pub fn is_valid(&self) -> bool {
        self.validation.fully_secure()
    }
}
