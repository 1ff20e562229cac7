//! Host reachability probing.
//!
//! This module provides:
//! - ICMP echo through a native datagram socket or the `ping` utility
//! - TCP connect probes on role-specific ports
//! - Group probing of every host in a [`HostAddressMap`](crate::models::HostAddressMap)
//!
//! Probe failures are never errors: they become `false` or absent fields in
//! the resulting [`HostReachabilityRecord`](crate::models::HostReachabilityRecord).

mod icmp;
mod ping;
mod port;
mod prober;
mod subprocess;

// Re-export public API
pub use ping::{PingMode, PingOutcome, Pinger, SystemPinger};
pub use port::{connect, open_ports};
pub use prober::{ProbeRequest, ReachabilityProber};
pub use subprocess::parse_received_count;
