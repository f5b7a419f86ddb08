use cloudflare_api::types::{
    ApiMessage, BucketList, DnsRecord, DnsRecordType, Envelope, StorageClass, Zone, ZoneStatus,
    ZoneType,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_zones_full() {
    let json = load_fixture("zones.json");
    let resp: Envelope<Vec<Zone>> = serde_json::from_str(&json).unwrap();
    assert!(resp.success);
    let zones = resp.result.unwrap();
    assert_eq!(zones.len(), 2);

    let zone = &zones[0];
    assert_eq!(zone.id, "023e105f4ecef8ad9ca31a8372d0c353");
    assert_eq!(zone.name, "example.com");
    assert_eq!(zone.status, ZoneStatus::ACTIVE);
    assert_eq!(zone.zone_type, Some(ZoneType::FULL));
    assert_eq!(zone.name_servers.len(), 2);
    assert_eq!(
        zone.account.as_ref().and_then(|a| a.name.as_deref()),
        Some("Demo Account")
    );
    assert!(zone.created_on.is_some());
}

#[test]
fn deserialize_zone_with_unknown_status() {
    let json = load_fixture("zones.json");
    let resp: Envelope<Vec<Zone>> = serde_json::from_str(&json).unwrap();
    let zone = &resp.result.unwrap()[1];
    assert_eq!(zone.status.as_str(), "quarantined");
    assert!(!zone.status.is_known());
    assert!(zone.paused);

    let reencoded = serde_json::to_value(zone).unwrap();
    assert_eq!(reencoded["status"], "quarantined");
}

#[test]
fn deserialize_page_info() {
    let json = load_fixture("zones.json");
    let resp: Envelope<Vec<Zone>> = serde_json::from_str(&json).unwrap();
    let info = resp.page_info.unwrap();
    assert_eq!(info.page, 1);
    assert_eq!(info.per_page, 20);
    assert_eq!(info.count, 2);
    assert_eq!(info.total_count, 42);
    assert_eq!(info.total_pages, 3);
    assert!(info.cursor.is_none());
    assert!(resp.cursor_info.is_none());
}

#[test]
fn deserialize_zones_empty() {
    let json = load_fixture("zones_minimal.json");
    let resp: Envelope<Vec<Zone>> = serde_json::from_str(&json).unwrap();
    assert!(resp.result.unwrap().is_empty());
    assert_eq!(resp.page_info.unwrap().total_pages, 0);
}

#[test]
fn deserialize_dns_records_with_mixed_case_types() {
    let json = load_fixture("dns_records.json");
    let resp: Envelope<Vec<DnsRecord>> = serde_json::from_str(&json).unwrap();
    let records = resp.result.unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].record_type, DnsRecordType::A);
    assert_eq!(records[0].proxied, Some(true));

    // Record types compare case-insensitively but keep their wire spelling.
    assert_eq!(records[1].record_type, DnsRecordType::MX);
    assert_eq!(records[1].record_type.as_str(), "mx");
    assert_eq!(records[1].priority, Some(10));

    assert!(!records[2].record_type.is_known());
    assert_eq!(records[2].record_type.as_str(), "OPENPGPKEY");
}

#[test]
fn deserialize_bucket_wrapper_with_cursor_in_page_info() {
    let json = load_fixture("buckets.json");
    let resp: Envelope<BucketList> = serde_json::from_str(&json).unwrap();
    let buckets = resp.result.unwrap().buckets;
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].storage_class, Some(StorageClass::STANDARD));
    assert_eq!(
        buckets[1].storage_class.as_ref().map(|s| s.as_str()),
        Some("GlacierDeep")
    );
    assert_eq!(
        resp.page_info.unwrap().cursor.as_deref(),
        Some("YXJjaGl2ZQ")
    );
}

#[test]
fn deserialize_error_envelope() {
    let json = load_fixture("error_envelope.json");
    let resp: Envelope<Vec<Zone>> = serde_json::from_str(&json).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.errors[0].code, 1003);
    assert_eq!(resp.errors[0].message, "Invalid zone");
    assert_eq!(
        resp.messages,
        vec![ApiMessage::Detailed {
            code: Some(10000),
            message: "see the request log".to_string()
        }]
    );
}

#[test]
fn deserialize_envelope_without_optional_blocks() {
    let resp: Envelope<serde_json::Value> =
        serde_json::from_str(r#"{"success":true,"result":{"id":"x"}}"#).unwrap();
    assert!(resp.errors.is_empty());
    assert!(resp.messages.is_empty());
    assert!(resp.page_info.is_none());
}

#[test]
fn deserialize_envelope_missing_success_returns_error() {
    let result = serde_json::from_str::<Envelope<Vec<Zone>>>(r#"{"result": []}"#);
    assert!(result.is_err());
}
