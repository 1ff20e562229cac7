//! Answer record sets.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dns::QueryType;

/// Tag describing one component of an answer's shape.
///
/// Serialized in lowercase (`"a"`, `"aaaa"`, `"ns"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordTag {
    A,
    Aaaa,
    Ns,
    Mx,
    Soa,
    Dnskey,
    Rrsig,
    Nsec,
    Ds,
    /// Marks a DNSSEC validation verdict
    Dnssec,
}

impl From<QueryType> for RecordTag {
    fn from(query_type: QueryType) -> Self {
        match query_type {
            QueryType::A => RecordTag::A,
            QueryType::Aaaa => RecordTag::Aaaa,
            QueryType::Ns => RecordTag::Ns,
            QueryType::Mx => RecordTag::Mx,
            QueryType::Soa => RecordTag::Soa,
            QueryType::Dnskey => RecordTag::Dnskey,
            QueryType::Rrsig => RecordTag::Rrsig,
            QueryType::Nsec => RecordTag::Nsec,
            QueryType::Ds => RecordTag::Ds,
        }
    }
}

/// Normalized answer of a single-type DNS query.
///
/// `answer` maps the record's position in the response to its rendered
/// value. It is `None` exactly when the query matched no record; an empty map
/// is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecordSet {
    domain: String,
    record_types: Vec<RecordTag>,
    answer: Option<BTreeMap<usize, String>>,
}

impl AnswerRecordSet {
    /// Builds a record set, collapsing an empty mapping to `None`.
    pub fn new(domain: &str, tag: RecordTag, entries: BTreeMap<usize, String>) -> Self {
        Self {
            domain: domain.to_string(),
            record_types: vec![tag],
            answer: if entries.is_empty() { None } else { Some(entries) },
        }
    }

    /// A record set for a query that matched nothing.
    pub fn empty(domain: &str, tag: RecordTag) -> Self {
        Self::new(domain, tag, BTreeMap::new())
    }

    /// Builds a record set from values in response order.
    pub fn from_values<I>(domain: &str, tag: RecordTag, values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::new(domain, tag, values.into_iter().enumerate().collect())
    }

    /// The queried name.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Tags describing the answer shape.
    pub fn record_types(&self) -> &[RecordTag] {
        &self.record_types
    }

    /// Index to value mapping, absent when nothing matched.
    pub fn answer(&self) -> Option<&BTreeMap<usize, String>> {
        self.answer.as_ref()
    }

    /// Value stored at a response index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.answer
            .as_ref()
            .and_then(|answer| answer.get(&index))
            .map(String::as_str)
    }

    /// Values in index order; empty when the answer is absent.
    pub fn values(&self) -> Vec<&str> {
        self.answer
            .iter()
            .flat_map(|answer| answer.values())
            .map(String::as_str)
            .collect()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.answer.as_ref().map_or(0, BTreeMap::len)
    }

    /// `true` when the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.answer.is_none()
    }

    /// Values as an owned list, absent when nothing matched.
    pub(crate) fn into_list(self) -> Option<Vec<String>> {
        self.answer.map(|answer| answer.into_values().collect())
    }
}
