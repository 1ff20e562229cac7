//! Host groups, host-address maps and reachability results.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use strum_macros::EnumIter;

use crate::address::AddressFamily;
use crate::config::{MX_PORTS, NS_PORTS, WEB_PORTS};
use crate::dns::QueryType;
use crate::models::RecordTag;

/// Role of the host names resolved for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum HostGroup {
    /// Name servers (NS records)
    Ns,
    /// Mail exchangers (MX records)
    Mx,
}

impl HostGroup {
    /// Record type listing the group's host names.
    pub fn query_type(self) -> QueryType {
        match self {
            HostGroup::Ns => QueryType::Ns,
            HostGroup::Mx => QueryType::Mx,
        }
    }
}

/// Service role of a probed host, which selects its default ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    Ns,
    Mx,
    Web,
    Other,
}

impl HostType {
    /// Ports probed when the caller supplies none.
    pub fn default_ports(self) -> &'static [u16] {
        match self {
            HostType::Ns => NS_PORTS,
            HostType::Mx => MX_PORTS,
            HostType::Web | HostType::Other => WEB_PORTS,
        }
    }

    /// Default ports unioned with `extra`, de-duplicated and sorted.
    pub fn ports_with(self, extra: &[u16]) -> Vec<u16> {
        self.default_ports()
            .iter()
            .chain(extra)
            .copied()
            .collect::<BTreeSet<u16>>()
            .into_iter()
            .collect()
    }
}

impl From<HostGroup> for HostType {
    fn from(group: HostGroup) -> Self {
        match group {
            HostGroup::Ns => HostType::Ns,
            HostGroup::Mx => HostType::Mx,
        }
    }
}

fn family_tag(family: AddressFamily) -> RecordTag {
    match family {
        AddressFamily::V4 => RecordTag::A,
        AddressFamily::V6 => RecordTag::Aaaa,
    }
}

fn group_tag(group: HostGroup) -> RecordTag {
    match group {
        HostGroup::Ns => RecordTag::Ns,
        HostGroup::Mx => RecordTag::Mx,
    }
}

/// Host names of one group mapped to one of their addresses.
///
/// `record_types` is always `[group, family]`, e.g. `["ns", "a"]`. `answer`
/// is absent when the group has no host names; otherwise it holds one entry
/// per host name, `None` where no address was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostAddressMap {
    domain: String,
    record_types: Vec<RecordTag>,
    answer: Option<BTreeMap<String, Option<String>>>,
    #[serde(skip)]
    host_group: HostGroup,
    #[serde(skip)]
    family: AddressFamily,
}

impl HostAddressMap {
    /// Builds a map, collapsing an empty mapping to `None`.
    pub fn new(
        domain: &str,
        host_group: HostGroup,
        family: AddressFamily,
        entries: BTreeMap<String, Option<String>>,
    ) -> Self {
        Self {
            domain: domain.to_string(),
            record_types: vec![group_tag(host_group), family_tag(family)],
            answer: if entries.is_empty() {
                None
            } else {
                Some(entries)
            },
            host_group,
            family,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn record_types(&self) -> &[RecordTag] {
        &self.record_types
    }

    pub fn host_group(&self) -> HostGroup {
        self.host_group
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// Host name to address mapping, absent when the group has no hosts.
    pub fn answer(&self) -> Option<&BTreeMap<String, Option<String>>> {
        self.answer.as_ref()
    }

    /// Address of a host name; `None` for unknown names and address-less hosts.
    pub fn address_of(&self, host_name: &str) -> Option<&str> {
        self.answer
            .as_ref()
            .and_then(|answer| answer.get(host_name))
            .and_then(|address| address.as_deref())
    }

    /// Hosts that have an address, absent when there are none.
    pub fn with_address(&self) -> Option<BTreeMap<&str, &str>> {
        let present: BTreeMap<&str, &str> = self
            .answer
            .iter()
            .flatten()
            .filter_map(|(name, address)| address.as_deref().map(|a| (name.as_str(), a)))
            .collect();
        (!present.is_empty()).then_some(present)
    }

    /// Hosts without an address, absent when there are none.
    pub fn without_address(&self) -> Option<BTreeSet<&str>> {
        let missing: BTreeSet<&str> = self
            .answer
            .iter()
            .flatten()
            .filter(|(_, address)| address.is_none())
            .map(|(name, _)| name.as_str())
            .collect();
        (!missing.is_empty()).then_some(missing)
    }
}

/// Result of probing one host.
///
/// `pingable` is unknown (`None`) when ping was not requested, `can_connect`
/// when no ports were requested. A host without an address is reported as
/// neither pingable nor connectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostReachabilityRecord {
    pub host_name: Option<String>,
    pub host_type: Option<HostType>,
    pub domain: Option<String>,
    pub pingable: Option<bool>,
    pub address_family: AddressFamily,
    pub address: Option<String>,
    pub ports_succeeded: Option<BTreeSet<u16>>,
    pub can_connect: Option<bool>,
}

impl HostReachabilityRecord {
    /// A record with no probe results yet.
    pub fn unprobed(address: Option<&str>, address_family: AddressFamily) -> Self {
        Self {
            host_name: None,
            host_type: None,
            domain: None,
            pingable: None,
            address_family,
            address: address.map(str::to_string),
            ports_succeeded: None,
            can_connect: None,
        }
    }

    /// `true` when the host answered on any port, or (unless
    /// `require_connect`) to ping.
    pub fn is_reached(&self, require_connect: bool) -> bool {
        let connected = self.can_connect.unwrap_or(false);
        if require_connect {
            connected
        } else {
            connected || self.pingable.unwrap_or(false)
        }
    }
}

/// Probe results for every host of a [`HostAddressMap`].
///
/// `hosts` is absent when the map had no hosts, which is distinct from a
/// group whose hosts were all unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostReachabilityReport {
    pub domain: String,
    pub record_types: Vec<RecordTag>,
    pub hosts: Option<BTreeMap<String, HostReachabilityRecord>>,
}

/// Hosts of a report split by whether they were reached.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReachSummary<'a> {
    pub reached: BTreeMap<&'a str, &'a HostReachabilityRecord>,
    pub unreached: BTreeMap<&'a str, &'a HostReachabilityRecord>,
}

impl HostReachabilityReport {
    /// Splits the hosts into reached and unreached.
    ///
    /// With `require_connect` only a successful TCP connect counts; otherwise
    /// a ping reply is enough.
    pub fn reach_summary(&self, require_connect: bool) -> ReachSummary<'_> {
        let mut summary = ReachSummary::default();
        for (name, record) in self.hosts.iter().flatten() {
            if record.is_reached(require_connect) {
                summary.reached.insert(name.as_str(), record);
            } else {
                summary.unreached.insert(name.as_str(), record);
            }
        }
        summary
    }
}
