//! Scripted DNS backend for resolver tests.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::net::Ipv4Addr;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::dns::{DnsBackend, QueryType, RawResponse, RecordData, ResolverContext};
#[cfg(test)]
use crate::error_handling::DnsCheckError;

/// Answers queries from a fixed table. Unscripted queries return no records.
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedBackend {
    answers: HashMap<(ResolverContext, String, QueryType), Result<RawResponse, DnsCheckError>>,
    calls: AtomicUsize,
}

#[cfg(test)]
impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(
        mut self,
        context: ResolverContext,
        name: &str,
        query_type: QueryType,
        response: RawResponse,
    ) -> Self {
        self.answers
            .insert((context, name.to_string(), query_type), Ok(response));
        self
    }

    /// Scripts a plain-context answer.
    pub fn plain(self, name: &str, query_type: QueryType, records: Vec<RecordData>) -> Self {
        self.answer(
            ResolverContext::Plain,
            name,
            query_type,
            RawResponse::plain(records),
        )
    }

    pub fn fail(mut self, context: ResolverContext, name: &str, query_type: QueryType) -> Self {
        self.answers.insert(
            (context, name.to_string(), query_type),
            Err(DnsCheckError::resolve(name, query_type, "SERVFAIL")),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl DnsBackend for ScriptedBackend {
    async fn query(
        &self,
        context: ResolverContext,
        name: &str,
        query_type: QueryType,
    ) -> Result<RawResponse, DnsCheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(&(context, name.to_string(), query_type))
            .cloned()
            .unwrap_or_else(|| Ok(RawResponse::empty()))
    }
}

#[cfg(test)]
pub fn ipv4(address: &str) -> RecordData {
    RecordData::Ipv4(address.parse::<Ipv4Addr>().expect("valid IPv4 literal"))
}

#[cfg(test)]
pub fn name(name: &str) -> RecordData {
    RecordData::Name(name.to_string())
}

#[cfg(test)]
pub fn exchange(preference: u16, exchange: &str) -> RecordData {
    RecordData::Exchange {
        preference,
        exchange: exchange.to_string(),
    }
}
