//! Configuration types.
//!
//! This module defines the enums and the configuration struct that are built
//! once at startup and threaded into the resolver and prober.

use std::path::PathBuf;
use std::time::Duration;

use strum_macros::EnumIter;

use crate::address::CompressionPolicy;
use crate::config::constants::{
    DNS_ATTEMPTS, DNS_TIMEOUT_SECS, MAX_CONCURRENT_PROBES, PROBE_TIMEOUT,
};
use crate::dns::AddressSelection;
use crate::reach::PingMode;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration.
///
/// Built once at startup and consumed by
/// [`init_checker`](crate::initialization::init_checker). Nothing in it is
/// mutated after the resolver contexts have been created.
///
/// # Examples
///
/// ```no_run
/// use domain_health::CheckerConfig;
/// use std::path::PathBuf;
///
/// let config = CheckerConfig {
///     resolv_conf: Some(PathBuf::from("/etc/resolv.conf")),
///     trust_anchor: Some(PathBuf::from("/usr/share/dns/root.key")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// resolv.conf-style file naming the upstream resolvers.
    /// `None` uses the resolver library's built-in upstreams.
    pub resolv_conf: Option<PathBuf>,

    /// Root trust anchor file, checked at startup for root DS or DNSKEY
    /// material. Validation always uses the root key built into the resolver
    /// library; the file's contents are not loaded into the validating context.
    pub trust_anchor: Option<PathBuf>,

    /// Per-query DNS timeout
    pub dns_timeout: Duration,

    /// Resolver attempts per upstream
    pub dns_attempts: usize,

    /// Timeout of a single ping or TCP connect
    pub probe_timeout: Duration,

    /// Upper bound on hosts probed concurrently within a group
    pub max_concurrent_probes: usize,

    /// How ICMP echo is performed
    pub ping_mode: PingMode,

    /// How host names are paired with their address answers
    pub address_selection: AddressSelection,

    /// IPv6 zero-run compression used for AAAA answers
    pub compression: CompressionPolicy,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            resolv_conf: None,
            trust_anchor: None,
            dns_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
            dns_attempts: DNS_ATTEMPTS,
            probe_timeout: PROBE_TIMEOUT,
            max_concurrent_probes: MAX_CONCURRENT_PROBES,
            ping_mode: PingMode::Auto,
            address_selection: AddressSelection::FirstAddress,
            compression: CompressionPolicy::EveryRun,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
