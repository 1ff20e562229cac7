//! Host name to address mapping for a domain's name servers and mail
//! exchangers.

use std::collections::BTreeMap;

use crate::address::AddressFamily;
use crate::dns::records::RecordResolver;
use crate::error_handling::DnsCheckError;
use crate::models::{AnswerRecordSet, HostAddressMap, HostGroup};

/// How each host name is paired with an entry of its own address answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressSelection {
    /// Every host name gets the first address of its own lookup.
    #[default]
    FirstAddress,
    /// The n-th host name gets the n-th address of its own lookup. The index
    /// restarts at zero whenever it passes the end of the current answer, and
    /// a host whose answer is shorter than the index gets no address.
    ///
    /// Kept for output compatibility with existing consumers.
    RunningIndex,
}

/// Resolves NS or MX host names and then each name's address.
#[derive(Clone)]
pub struct HostMapper {
    resolver: RecordResolver,
    selection: AddressSelection,
}

impl HostMapper {
    pub fn new(resolver: RecordResolver) -> Self {
        Self {
            resolver,
            selection: AddressSelection::default(),
        }
    }

    pub fn with_selection(mut self, selection: AddressSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Maps every NS or MX host name of `domain` to one of its addresses.
    ///
    /// A host whose own address lookup fails or returns nothing is kept in
    /// the map without an address.
    ///
    /// # Errors
    ///
    /// - [`DnsCheckError::Resolve`] if the NS or MX lookup itself fails
    /// - [`DnsCheckError::MissingNsRecords`] if `group` is NS and the domain
    ///   has no name servers
    ///
    /// A domain without MX records is not an error; the map's answer is
    /// absent.
    pub async fn get_mapping(
        &self,
        domain: &str,
        group: HostGroup,
        family: AddressFamily,
    ) -> Result<HostAddressMap, DnsCheckError> {
        let names = match group {
            HostGroup::Ns => self.resolver.ns(domain).await?,
            HostGroup::Mx => self.resolver.mx(domain).await?,
        };

        if group == HostGroup::Ns && names.is_empty() {
            return Err(DnsCheckError::MissingNsRecords {
                domain: domain.to_string(),
            });
        }

        let mut entries = BTreeMap::new();
        let mut index = 0usize;
        for name in names.values() {
            let answer = self.host_addresses(name, family).await;
            let address = match self.selection {
                AddressSelection::FirstAddress => answer.values().first().map(|a| a.to_string()),
                AddressSelection::RunningIndex => {
                    let address = answer.get(index).map(str::to_string);
                    index += 1;
                    if !answer.is_empty() && index >= answer.len() {
                        index = 0;
                    }
                    address
                }
            };
            entries.insert(name.to_string(), address);
        }

        log::debug!(
            "Mapped {} {group:?} hosts of {domain} to {family} addresses",
            entries.len()
        );
        Ok(HostAddressMap::new(domain, group, family, entries))
    }

    async fn host_addresses(&self, name: &str, family: AddressFamily) -> AnswerRecordSet {
        match self.resolver.addresses(name, family).await {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Failed to resolve {family} address of {name}: {e}");
                AnswerRecordSet::empty(name, family.query_type().into())
            }
        }
    }
}
