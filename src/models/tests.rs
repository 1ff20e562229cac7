use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;

use super::*;
use crate::address::AddressFamily;

fn verdicts(pairs: &[(&str, SecurityStatus)]) -> ValidationResult {
    ValidationResult::new(
        "example.com",
        pairs
            .iter()
            .map(|(addr, status)| (addr.to_string(), *status))
            .collect(),
    )
}

#[test]
fn test_answer_record_set_empty_is_absent() {
    let set = AnswerRecordSet::from_values("example.com", RecordTag::A, Vec::new());
    assert!(set.is_empty());
    assert!(set.answer().is_none(), "empty answers must be absent, not {{}}");
    assert_eq!(set.len(), 0);
    assert!(set.values().is_empty());

    let value = serde_json::to_value(&set).unwrap();
    assert_eq!(
        value,
        json!({"domain": "example.com", "record_types": ["a"], "answer": null})
    );
}

#[test]
fn test_answer_record_set_indices_follow_response_order() {
    let set = AnswerRecordSet::from_values(
        "example.com",
        RecordTag::Ns,
        vec!["b.iana-servers.net.".to_string(), "a.iana-servers.net.".to_string()],
    );
    assert_eq!(set.get(0), Some("b.iana-servers.net."));
    assert_eq!(set.get(1), Some("a.iana-servers.net."));
    assert_eq!(set.get(2), None);

    let value = serde_json::to_value(&set).unwrap();
    assert_eq!(value["answer"]["0"], "b.iana-servers.net.");
    assert_eq!(value["record_types"], json!(["ns"]));
}

#[test]
fn test_answer_record_set_keeps_sparse_indices() {
    let mut entries = BTreeMap::new();
    entries.insert(1, "2001:db8::1".to_string());
    let set = AnswerRecordSet::new("example.com", RecordTag::Aaaa, entries);
    assert_eq!(set.get(0), None);
    assert_eq!(set.get(1), Some("2001:db8::1"));
    assert_eq!(set.into_list(), Some(vec!["2001:db8::1".to_string()]));
}

#[test]
fn test_host_address_map_record_types_follow_inputs() {
    let map = HostAddressMap::new("example.com", HostGroup::Mx, AddressFamily::V6, BTreeMap::new());
    assert_eq!(map.record_types(), &[RecordTag::Mx, RecordTag::Aaaa]);
    assert!(map.answer().is_none());
    assert!(map.with_address().is_none());
    assert!(map.without_address().is_none());
}

#[test]
fn test_host_address_map_address_views() {
    let mut entries = BTreeMap::new();
    entries.insert("ns1.example.net.".to_string(), Some("1.2.3.4".to_string()));
    entries.insert("ns2.example.net.".to_string(), None);
    let map = HostAddressMap::new("example.com", HostGroup::Ns, AddressFamily::V4, entries);

    assert_eq!(map.address_of("ns1.example.net."), Some("1.2.3.4"));
    assert_eq!(map.address_of("ns2.example.net."), None);
    assert_eq!(map.address_of("ns3.example.net."), None);

    let present = map.with_address().expect("one host has an address");
    assert_eq!(present.len(), 1);
    assert_eq!(present.get("ns1.example.net."), Some(&"1.2.3.4"));

    let missing = map.without_address().expect("one host has no address");
    assert!(missing.contains("ns2.example.net."));

    let value = serde_json::to_value(&map).unwrap();
    assert_eq!(
        value,
        json!({
            "domain": "example.com",
            "record_types": ["ns", "a"],
            "answer": {"ns1.example.net.": "1.2.3.4", "ns2.example.net.": null}
        })
    );
}

#[test]
fn test_host_type_ports_union() {
    assert_eq!(HostType::Ns.ports_with(&[]), vec![53]);
    assert_eq!(HostType::Mx.ports_with(&[25, 2525]), vec![25, 465, 587, 2525]);
    assert_eq!(HostType::Other.default_ports(), HostType::Web.default_ports());
    assert_eq!(HostType::from(HostGroup::Mx), HostType::Mx);
}

#[test]
fn test_fully_secure_and_chain_intact() {
    let mixed = verdicts(&[
        ("192.0.2.1", SecurityStatus::Secure),
        ("192.0.2.2", SecurityStatus::Bogus),
    ]);
    assert!(!mixed.fully_secure());
    assert_eq!(mixed.chain_intact(), Some(false));

    let secure = verdicts(&[
        ("192.0.2.1", SecurityStatus::Secure),
        ("192.0.2.2", SecurityStatus::Secure),
    ]);
    assert!(secure.fully_secure());
    assert_eq!(secure.chain_intact(), Some(true));

    let unsigned = verdicts(&[("192.0.2.1", SecurityStatus::Insecure)]);
    assert!(!unsigned.fully_secure());
    assert_eq!(unsigned.chain_intact(), None);

    let absent = verdicts(&[]);
    assert!(absent.answer.is_none());
    assert!(!absent.fully_secure());
    assert_eq!(absent.chain_intact(), None);
}

#[test]
fn test_security_status_from_flags() {
    assert_eq!(SecurityStatus::from_flags(true, false), SecurityStatus::Secure);
    assert_eq!(SecurityStatus::from_flags(false, true), SecurityStatus::Bogus);
    assert_eq!(SecurityStatus::from_flags(false, false), SecurityStatus::Insecure);
}

#[test]
fn test_reach_summary_respects_require_connect() {
    let mut pinged = HostReachabilityRecord::unprobed(Some("192.0.2.1"), AddressFamily::V4);
    pinged.pingable = Some(true);
    pinged.can_connect = Some(false);

    let mut connected = HostReachabilityRecord::unprobed(Some("192.0.2.2"), AddressFamily::V4);
    connected.pingable = Some(false);
    connected.can_connect = Some(true);
    connected.ports_succeeded = Some(BTreeSet::from([53]));

    let mut hosts = BTreeMap::new();
    hosts.insert("ns1.example.net.".to_string(), pinged);
    hosts.insert("ns2.example.net.".to_string(), connected);
    let report = HostReachabilityReport {
        domain: "example.com".to_string(),
        record_types: vec![RecordTag::Ns, RecordTag::A],
        hosts: Some(hosts),
    };

    let lenient = report.reach_summary(false);
    assert_eq!(lenient.reached.len(), 2);
    assert!(lenient.unreached.is_empty());

    let strict = report.reach_summary(true);
    assert_eq!(strict.reached.keys().copied().collect::<Vec<_>>(), vec!["ns2.example.net."]);
    assert_eq!(strict.unreached.keys().copied().collect::<Vec<_>>(), vec!["ns1.example.net."]);
}

#[test]
fn test_check_response_carries_kind() {
    let set = AnswerRecordSet::from_values("example.com", RecordTag::A, vec!["192.0.2.1".to_string()]);
    let response = CheckResponse::from(set);
    assert_eq!(response.kind(), ResponseKind::Records);
    assert_eq!(response.domain(), Some("example.com"));

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["kind"], "records");
    assert_eq!(value["answer"]["0"], "192.0.2.1");

    let posture = DnssecPosture::new(
        verdicts(&[("192.0.2.1", SecurityStatus::Secure)]),
        SignatureBundle::empty("example.com"),
    );
    assert!(posture.is_valid());
    let value = serde_json::to_value(CheckResponse::from(posture)).unwrap();
    assert_eq!(value["kind"], "dnssec");
    assert_eq!(value["validation"]["answer"]["192.0.2.1"], "secure");
    assert_eq!(value["signatures"]["dnskey"], serde_json::Value::Null);
}
