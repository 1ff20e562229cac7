//! Error type definitions.
//!
//! This module defines the errors raised by DNS checks and by initialization.
//! Reachability failures never appear here: they are folded into the probe
//! results as negatives.

use hickory_resolver::error::ResolveError;
use log::SetLoggerError;
use thiserror::Error;

use crate::dns::QueryType;

/// Errors raised by DNS resolution and address formatting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsCheckError {
    /// The resolver reported a failure status for a query.
    ///
    /// Fatal for the call that issued the query; it is not retried.
    #[error("DNS resolution failed for {domain} ({query_type}): {reason}")]
    Resolve {
        /// Name that was queried
        domain: String,
        /// Record type that was queried
        query_type: QueryType,
        /// Resolver-provided description of the failure
        reason: String,
    },

    /// Raw IPv6 data that is not exactly 16 bytes long.
    #[error("IPv6 address must be 16 bytes, got {length}")]
    InvalidAddressLength {
        /// Number of bytes received
        length: usize,
    },

    /// A domain returned no NS records.
    ///
    /// Every delegated domain has at least one name server, so this is an
    /// integrity violation rather than a transient failure.
    #[error("no NS records found for {domain}")]
    MissingNsRecords {
        /// Domain that has no name servers
        domain: String,
    },
}

impl DnsCheckError {
    /// Builds a [`DnsCheckError::Resolve`] from any displayable cause.
    pub fn resolve(domain: &str, query_type: QueryType, reason: impl std::fmt::Display) -> Self {
        DnsCheckError::Resolve {
            domain: domain.to_string(),
            query_type,
            reason: reason.to_string(),
        }
    }
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The resolver configuration file could not be read.
    #[error("Resolver configuration error for {path}: {source}")]
    ResolverConfigError {
        /// Path of the resolv.conf-style file
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The resolver configuration file was read but is not valid resolv.conf.
    #[error("Resolver configuration parse error for {path}: {source}")]
    ResolverConfigParseError {
        /// Path of the resolv.conf-style file
        path: String,
        #[source]
        source: ResolveError,
    },

    /// The trust anchor file could not be read or holds no root key material.
    #[error("Trust anchor error for {path}: {reason}")]
    TrustAnchorError {
        /// Path of the trust anchor file
        path: String,
        /// What was wrong with it
        reason: String,
    },
}
