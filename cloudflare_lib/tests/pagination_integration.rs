use cloudflare_lib::types::{Bucket, StorageClass, Zone};
use cloudflare_lib::{
    try_collect_partial, ApiClient, CancellationToken, ClientConfig, Error, PageQuery, ZoneQuery,
};
use futures::StreamExt;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new("test-token").with_base_url(&server.uri())).unwrap()
}

fn zone(i: usize) -> Value {
    json!({
        "id": format!("{:032x}", i),
        "name": format!("zone{}.example.com", i),
        "status": "active"
    })
}

/// An enveloped page of zones `start..start + count`.
fn zones_page(start: usize, count: usize, page: u32, total_pages: u32, total_count: u32) -> Value {
    let items: Vec<Value> = (start..start + count).map(zone).collect();
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": items,
        "result_info": {
            "page": page,
            "per_page": 25,
            "count": count,
            "total_count": total_count,
            "total_pages": total_pages
        }
    })
}

async fn mount_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", page.to_string()))
        .and(query_param("per_page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

// ============================================================================
// Page-number listings
// ============================================================================

#[tokio::test]
async fn page_listing_yields_every_item_in_three_requests() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, zones_page(0, 25, 1, 3, 54)).await;
    mount_page(&mock_server, 2, zones_page(25, 25, 2, 3, 54)).await;
    mount_page(&mock_server, 3, zones_page(50, 4, 3, 3, 54)).await;

    let client = client_for(&mock_server);
    let zones: Vec<Zone> = client
        .list_zones(&ZoneQuery::default(), Some(25))
        .map(|z| z.unwrap())
        .collect()
        .await;

    assert_eq!(zones.len(), 54);
    assert_eq!(request_count(&mock_server).await, 3);
    let names: Vec<String> = zones.iter().map(|z| z.name.clone()).collect();
    let expected: Vec<String> = (0..54).map(|i| format!("zone{}.example.com", i)).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn page_listing_stops_on_empty_page() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, zones_page(0, 0, 1, 5, 100)).await;

    let client = client_for(&mock_server);
    let zones: Vec<Result<Zone, Error>> = client
        .list_zones(&ZoneQuery::default(), Some(25))
        .collect()
        .await;

    assert!(zones.is_empty());
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn page_listing_stops_without_result_info() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": [zone(1), zone(2)]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let zones: Vec<Zone> = client
        .list_zones(&ZoneQuery::default(), None)
        .map(|z| z.unwrap())
        .collect()
        .await;

    assert_eq!(zones.len(), 2);
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn page_listing_sends_filters_on_every_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("name", "example.com"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zones_page(0, 25, 1, 2, 26)))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("name", "example.com"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zones_page(25, 1, 2, 2, 26)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = ZoneQuery::default().with_name("example.com");
    let count = client.list_zones(&query, Some(25)).count().await;
    assert_eq!(count, 26);
}

#[tokio::test]
async fn dropping_the_stream_early_issues_no_further_requests() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, zones_page(0, 25, 1, 3, 54)).await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zones_page(25, 25, 2, 3, 54)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first: Vec<Result<Zone, Error>> = client
        .list_zones(&ZoneQuery::default(), Some(25))
        .take(10)
        .collect()
        .await;

    assert_eq!(first.len(), 10);
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn single_page_accessor_is_repeatable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zones_page(25, 25, 2, 3, 54)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = ZoneQuery::default();
    let first = client
        .zones_page(&query, PageQuery::new(2, Some(25)))
        .await
        .unwrap();
    let second = client
        .zones_page(&query, PageQuery::new(2, Some(25)))
        .await
        .unwrap();

    let ids = |zones: &[Zone]| zones.iter().map(|z| z.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&first.items), ids(&second.items));
    assert_eq!(first.info, second.info);
    assert_eq!(first.next_page(2), Some(3));
}

// ============================================================================
// Failure mid-listing
// ============================================================================

#[tokio::test]
async fn failure_on_later_page_keeps_earlier_items() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, zones_page(0, 25, 1, 3, 54)).await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let partial = try_collect_partial(client.list_zones(&ZoneQuery::default(), Some(25)))
        .await
        .unwrap_err();

    assert_eq!(partial.items.len(), 25);
    match &partial.source {
        Error::Pagination {
            items_yielded,
            pages_completed,
            ..
        } => {
            assert_eq!(*items_yielded, 25);
            assert_eq!(*pages_completed, 1);
        }
        other => panic!("expected Pagination, got {other:?}"),
    }
    assert!(matches!(partial.root(), Error::HttpStatus { status: 500, .. }));
    assert_eq!(request_count(&mock_server).await, 2);
}

#[tokio::test]
async fn failure_on_first_page_is_not_wrapped() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("invalid_zone.json")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let results: Vec<Result<Zone, Error>> = client
        .list_zones(&ZoneQuery::default(), None)
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    let err = results.into_iter().next().unwrap().unwrap_err();
    assert!(matches!(err, Error::Api { status: 200, .. }));
    assert_eq!(err.api_errors()[0].code, 1003);
}

#[tokio::test]
async fn cancellation_stops_listing_between_pages() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, zones_page(0, 25, 1, 3, 54)).await;

    let token = CancellationToken::new();
    let client = client_for(&mock_server).with_cancellation(token.clone());
    let stream = client.list_zones(&ZoneQuery::default(), Some(25));
    futures::pin_mut!(stream);

    for _ in 0..25 {
        stream.next().await.unwrap().unwrap();
    }
    token.cancel();

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err.root(), Error::Cancelled));
    assert!(stream.next().await.is_none());
    assert_eq!(request_count(&mock_server).await, 1);
}

// ============================================================================
// Cursor listings
// ============================================================================

#[tokio::test]
async fn cursor_listing_stops_when_cursor_is_absent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": [{"n": 3}],
            "cursor_result_info": {"count": 1, "per_page": 2}
        })))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": [{"n": 1}, {"n": 2}],
            "cursor_result_info": {"count": 2, "per_page": 2, "cursor": "abc"}
        })))
        .with_priority(2)
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let items: Vec<Value> = client
        .cursor_paginate::<Value>(cloudflare_lib::RequestSpec::get("/items"), Some(2))
        .map(|v| v.unwrap())
        .collect()
        .await;

    assert_eq!(items, vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})]);
    assert_eq!(request_count(&mock_server).await, 2);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(!requests[0].url.query().unwrap_or("").contains("cursor"));
}

#[tokio::test]
async fn repeated_cursor_ends_listing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": [{"n": 1}],
            "cursor_result_info": {"count": 1, "per_page": 1, "cursor": "same"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let items: Vec<Result<Value, Error>> = client
        .cursor_paginate::<Value>(cloudflare_lib::RequestSpec::get("/items"), None)
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(request_count(&mock_server).await, 2);
}

fn cursor_body(n: u32, cursor: &str) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": [{"n": n}],
        "cursor_result_info": {"count": 1, "per_page": 1, "cursor": cursor}
    })
}

#[tokio::test]
async fn cycling_cursors_end_listing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("cursor", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cursor_body(2, "B")))
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("cursor", "B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cursor_body(3, "A")))
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cursor_body(1, "A")))
        .with_priority(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let listing = client
        .cursor_paginate::<Value>(cloudflare_lib::RequestSpec::get("/items"), None)
        .map(|v| v.unwrap())
        .collect::<Vec<Value>>();
    let items = tokio::time::timeout(std::time::Duration::from_secs(5), listing)
        .await
        .expect("cursor listing did not terminate");

    assert_eq!(items, vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})]);
    assert_eq!(request_count(&mock_server).await, 3);
}

#[tokio::test]
async fn bucket_listing_extracts_wrapper_and_reads_cursor_from_result_info() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc123/r2/buckets"))
        .and(query_param("cursor", "YmFja3Vwcw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("buckets_page2.json")))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc123/r2/buckets"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("buckets_page1.json")))
        .with_priority(2)
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let buckets: Vec<Bucket> = client
        .list_buckets("acc123", Some(2))
        .map(|b| b.unwrap())
        .collect()
        .await;

    let names: Vec<&str> = buckets.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["assets", "backups", "logs"]);
    assert_eq!(
        buckets[1].storage_class,
        Some(StorageClass::INFREQUENT_ACCESS)
    );
    let unknown = buckets[2].storage_class.as_ref().unwrap();
    assert!(!unknown.is_known());
    assert_eq!(unknown.as_str(), "GlacierDeep");
}
