//! Configuration constants.
//!
//! This module defines the operational defaults used throughout the library:
//! network timeouts, resolver behaviour, probing limits and the well-known
//! service ports for each host role.

use std::time::Duration;

// Network operation timeouts
/// Timeout for a single reachability probe (one ICMP echo or one TCP connect).
/// The first bounded attempt is authoritative; probes are never retried.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Attempts the resolver library makes per upstream before reporting failure
pub const DNS_ATTEMPTS: usize = 2;

/// Maximum number of hosts probed at the same time within one host group
pub const MAX_CONCURRENT_PROBES: usize = 16;

/// Number of ICMP echo requests sent per ping
pub const PING_PACKET_COUNT: u32 = 1;
/// Payload carried by native ICMP echo requests
pub const PING_PAYLOAD: &[u8] = b"domain_health-echo";

// Default service ports per host role
/// DNS port checked on name servers
pub const NS_PORTS: &[u16] = &[53];
/// Submission, SMTPS and SMTP ports checked on mail exchangers
pub const MX_PORTS: &[u16] = &[587, 465, 25];
/// HTTP and HTTPS ports checked on web (and unclassified) hosts
pub const WEB_PORTS: &[u16] = &[80, 443];

