//! Per-host and per-group reachability probing.

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use crate::address::AddressFamily;
use crate::config::{CheckerConfig, MAX_CONCURRENT_PROBES, PROBE_TIMEOUT};
use crate::models::{HostAddressMap, HostReachabilityRecord, HostReachabilityReport, HostType};
use crate::reach::port::open_ports;
use crate::reach::{Pinger, SystemPinger};

/// What to probe on one host.
///
/// Pinging is on and no ports are requested by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    address: Option<String>,
    family: AddressFamily,
    host_name: Option<String>,
    host_type: Option<HostType>,
    domain: Option<String>,
    ports: Vec<u16>,
    ping: bool,
}

impl ProbeRequest {
    pub fn new(address: Option<&str>, family: AddressFamily) -> Self {
        Self {
            address: address.map(str::to_string),
            family,
            host_name: None,
            host_type: None,
            domain: None,
            ports: Vec::new(),
            ping: true,
        }
    }

    pub fn host_name(mut self, host_name: &str) -> Self {
        self.host_name = Some(host_name.to_string());
        self
    }

    pub fn host_type(mut self, host_type: HostType) -> Self {
        self.host_type = Some(host_type);
        self
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }

    /// Ports to connect to; duplicates are tried once.
    pub fn ports(mut self, ports: &[u16]) -> Self {
        self.ports = ports
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        self
    }

    pub fn ping(mut self, ping: bool) -> Self {
        self.ping = ping;
        self
    }

    /// Sets the role and adds the role's default ports to the requested ones.
    fn with_role(self, host_type: HostType) -> Self {
        let ports = host_type.ports_with(&self.ports);
        Self {
            host_type: Some(host_type),
            ports,
            ..self
        }
    }
}

/// Probes hosts with ICMP echo and TCP connects.
///
/// Every probe is bounded by one timeout and never retried. Failures only
/// ever turn into negative results.
#[derive(Clone)]
pub struct ReachabilityProber {
    pinger: Arc<dyn Pinger>,
    timeout: Duration,
    max_concurrent: usize,
}

impl ReachabilityProber {
    pub fn new(pinger: Arc<dyn Pinger>) -> Self {
        Self {
            pinger,
            timeout: PROBE_TIMEOUT,
            max_concurrent: MAX_CONCURRENT_PROBES,
        }
    }

    /// A prober using the system pinger and the configured limits.
    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new(Arc::new(SystemPinger::new(config.ping_mode)))
            .with_timeout(config.probe_timeout)
            .with_max_concurrent(config.max_concurrent_probes)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps how many hosts of a group are probed at once (at least one).
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Probes one host.
    ///
    /// A request without an address yields `pingable = false` and
    /// `can_connect = false` without touching the network. Otherwise the ping
    /// (if requested) and all port connects run concurrently.
    pub async fn probe(&self, request: &ProbeRequest) -> HostReachabilityRecord {
        let mut record = HostReachabilityRecord {
            host_name: request.host_name.clone(),
            host_type: request.host_type,
            domain: request.domain.clone(),
            ..HostReachabilityRecord::unprobed(request.address.as_deref(), request.family)
        };

        let Some(text) = request.address.as_deref() else {
            record.pingable = Some(false);
            record.can_connect = Some(false);
            return record;
        };

        let Some(address) = parse_address(text, request.family) else {
            if request.ping {
                record.pingable = Some(false);
            }
            if !request.ports.is_empty() {
                record.can_connect = Some(false);
            }
            return record;
        };

        let ping = async {
            if request.ping {
                Some(self.pinger.ping(address, self.timeout).await.is_reachable())
            } else {
                None
            }
        };
        let connect = async {
            if request.ports.is_empty() {
                None
            } else {
                Some(open_ports(address, &request.ports, self.timeout).await)
            }
        };
        let (pingable, open) = tokio::join!(ping, connect);

        record.pingable = pingable;
        if let Some(open) = open {
            record.can_connect = Some(!open.is_empty());
            record.ports_succeeded = (!open.is_empty()).then_some(open);
        }
        record
    }

    /// Probes a name server on port 53 plus the requested ports.
    pub async fn reach_ns(&self, request: ProbeRequest) -> HostReachabilityRecord {
        self.probe(&request.with_role(HostType::Ns)).await
    }

    /// Probes a mail exchanger on ports 587, 465 and 25 plus the requested
    /// ports.
    pub async fn reach_mail(&self, request: ProbeRequest) -> HostReachabilityRecord {
        self.probe(&request.with_role(HostType::Mx)).await
    }

    /// Probes a web server on ports 80 and 443 plus the requested ports.
    pub async fn reach_web(&self, request: ProbeRequest) -> HostReachabilityRecord {
        self.probe(&request.with_role(HostType::Web)).await
    }

    /// Probes every host of a mapping.
    ///
    /// Each host is probed on its role's default ports unioned with
    /// `extra_ports`. Hosts are probed concurrently up to the configured
    /// limit. When the mapping has no hosts, the report's `hosts` is absent.
    pub async fn probe_group(
        &self,
        map: &HostAddressMap,
        extra_ports: &[u16],
        ping: bool,
    ) -> HostReachabilityReport {
        let host_type = HostType::from(map.host_group());
        let mut report = HostReachabilityReport {
            domain: map.domain().to_string(),
            record_types: map.record_types().to_vec(),
            hosts: None,
        };

        let Some(answer) = map.answer() else {
            return report;
        };

        let semaphore = Semaphore::new(self.max_concurrent);
        let mut probes: FuturesUnordered<_> = answer
            .iter()
            .map(|(host_name, address)| {
                let request = ProbeRequest::new(address.as_deref(), map.family())
                    .host_name(host_name)
                    .domain(map.domain())
                    .ports(extra_ports)
                    .ping(ping)
                    .with_role(host_type);
                let semaphore = &semaphore;
                async move {
                    // The semaphore is never closed
                    let _permit = semaphore.acquire().await.ok();
                    (host_name.clone(), self.probe(&request).await)
                }
            })
            .collect();

        let mut hosts = BTreeMap::new();
        while let Some((host_name, record)) = probes.next().await {
            hosts.insert(host_name, record);
        }
        log::debug!(
            "Probed {} {host_type:?} hosts of {}",
            hosts.len(),
            map.domain()
        );
        report.hosts = Some(hosts);
        report
    }
}

fn parse_address(text: &str, family: AddressFamily) -> Option<IpAddr> {
    match text.parse::<IpAddr>() {
        Ok(address) if AddressFamily::of(&address) == family => Some(address),
        Ok(address) => {
            log::warn!("Address {address} is not an {family} address, skipping probes");
            None
        }
        Err(e) => {
            log::warn!("Invalid address {text:?}: {e}");
            None
        }
    }
}
