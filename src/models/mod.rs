//! Result shapes produced by the checks.
//!
//! Every shape is built fresh per call and never mutated afterwards. Absent
//! results are `None` (serialized as `null`) and are never replaced by empty
//! collections.

mod dnssec;
mod hosts;
mod records;
mod response;

pub use dnssec::{DnssecPosture, SecurityStatus, SignatureBundle, ValidationResult};
pub use hosts::{
    HostAddressMap, HostGroup, HostReachabilityRecord, HostReachabilityReport, HostType,
    ReachSummary,
};
pub use records::{AnswerRecordSet, RecordTag};
pub use response::{CheckResponse, ResponseKind};

#[cfg(test)]
mod tests;
