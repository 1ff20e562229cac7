//! IP address families.

use std::fmt;
use std::net::IpAddr;

use serde::{Serialize, Serializer};
use strum_macros::EnumIter;

use crate::dns::QueryType;

/// IPv4 or IPv6.
///
/// Serializes as the version number (`4` or `6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum AddressFamily {
    /// IPv4, resolved through A records
    V4,
    /// IPv6, resolved through AAAA records
    V6,
}

impl AddressFamily {
    /// The numeric IP version.
    pub fn version(self) -> u8 {
        match self {
            AddressFamily::V4 => 4,
            AddressFamily::V6 => 6,
        }
    }

    /// Parses a numeric IP version.
    pub fn from_version(version: u8) -> Option<Self> {
        match version {
            4 => Some(AddressFamily::V4),
            6 => Some(AddressFamily::V6),
            _ => None,
        }
    }

    /// The address record type that carries this family.
    pub fn query_type(self) -> QueryType {
        match self {
            AddressFamily::V4 => QueryType::A,
            AddressFamily::V6 => QueryType::Aaaa,
        }
    }

    /// Family of a parsed address.
    pub fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv{}", self.version())
    }
}

impl Serialize for AddressFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.version())
    }
}
