//! Sum type over every shape the checker produces.

use serde::Serialize;

use crate::models::{
    AnswerRecordSet, DnssecPosture, HostAddressMap, HostReachabilityRecord,
    HostReachabilityReport, SignatureBundle, ValidationResult,
};

/// Discriminant of a [`CheckResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Records,
    HostMapping,
    Host,
    Hosts,
    DnssecSignatures,
    DnssecValidation,
    Dnssec,
}

/// Any result produced by a check.
///
/// Serializes as the inner shape with an added `kind` field naming the
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckResponse {
    Records(AnswerRecordSet),
    HostMapping(HostAddressMap),
    Host(HostReachabilityRecord),
    Hosts(HostReachabilityReport),
    DnssecSignatures(SignatureBundle),
    DnssecValidation(ValidationResult),
    Dnssec(DnssecPosture),
}

impl CheckResponse {
    pub fn kind(&self) -> ResponseKind {
        match self {
            CheckResponse::Records(_) => ResponseKind::Records,
            CheckResponse::HostMapping(_) => ResponseKind::HostMapping,
            CheckResponse::Host(_) => ResponseKind::Host,
            CheckResponse::Hosts(_) => ResponseKind::Hosts,
            CheckResponse::DnssecSignatures(_) => ResponseKind::DnssecSignatures,
            CheckResponse::DnssecValidation(_) => ResponseKind::DnssecValidation,
            CheckResponse::Dnssec(_) => ResponseKind::Dnssec,
        }
    }

    /// Domain the response is about, when it names one.
    pub fn domain(&self) -> Option<&str> {
        match self {
            CheckResponse::Records(r) => Some(r.domain()),
            CheckResponse::HostMapping(m) => Some(m.domain()),
            CheckResponse::Host(h) => h.domain.as_deref(),
            CheckResponse::Hosts(h) => Some(&h.domain),
            CheckResponse::DnssecSignatures(s) => Some(&s.domain),
            CheckResponse::DnssecValidation(v) => Some(&v.domain),
            CheckResponse::Dnssec(d) => Some(&d.domain),
        }
    }
}

macro_rules! impl_from_shape {
    ($($shape:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$shape> for CheckResponse {
                fn from(shape: $shape) -> Self {
                    CheckResponse::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape! {
    AnswerRecordSet => Records,
    HostAddressMap => HostMapping,
    HostReachabilityRecord => Host,
    HostReachabilityReport => Hosts,
    SignatureBundle => DnssecSignatures,
    ValidationResult => DnssecValidation,
    DnssecPosture => Dnssec,
}
