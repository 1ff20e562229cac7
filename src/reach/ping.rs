//! ICMP reachability.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use strum_macros::EnumIter;

use crate::reach::{icmp, subprocess};

/// How [`SystemPinger`] sends echo requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum PingMode {
    /// Native datagram socket, falling back to the `ping` utility when the OS
    /// does not allow one
    #[default]
    Auto,
    /// Native datagram socket only
    Native,
    /// The `ping`/`ping6` utility only
    Subprocess,
}

/// Echo requests sent and replies received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingOutcome {
    pub sent: u32,
    pub received: u32,
}

impl PingOutcome {
    pub fn answered(sent: u32) -> Self {
        Self {
            sent,
            received: sent,
        }
    }

    pub fn lost(sent: u32) -> Self {
        Self { sent, received: 0 }
    }

    /// `true` when at least one reply arrived.
    pub fn is_reachable(&self) -> bool {
        self.received >= 1
    }
}

/// Sends one ICMP echo to an address.
///
/// Implementations never fail: every problem is reported as zero replies.
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping(&self, address: IpAddr, timeout: Duration) -> PingOutcome;
}

/// Pings through the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPinger {
    mode: PingMode,
}

impl SystemPinger {
    pub fn new(mode: PingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PingMode {
        self.mode
    }
}

#[async_trait]
impl Pinger for SystemPinger {
    async fn ping(&self, address: IpAddr, timeout: Duration) -> PingOutcome {
        match self.mode {
            PingMode::Subprocess => subprocess::ping(address, timeout).await,
            PingMode::Native => match icmp::ping(address, timeout).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::warn!("Cannot open ICMP socket to ping {address}: {e}");
                    PingOutcome::lost(1)
                }
            },
            PingMode::Auto => match icmp::ping(address, timeout).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::debug!("ICMP socket unavailable ({e}), using ping utility for {address}");
                    subprocess::ping(address, timeout).await
                }
            },
        }
    }
}
