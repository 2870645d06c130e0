//! Detail sync against a real HTTP backend.

mod common;

use common::{client_for, device_json, within, FAST_INTERVAL};
use fleetdash::sync::{DetailStatus, DetailSync};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_missing_device_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(path("/iot/devices/missing/twin"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "nope"})))
        .mount(&server)
        .await;

    let mut sync = DetailSync::new(client_for(&server), FAST_INTERVAL);
    sync.select(Some("missing"));
    assert!(within(sync.changed()).await);

    let state = sync.state();
    assert!(state.not_found);
    assert_eq!(sync.status(), DetailStatus::NotFound);
}

#[tokio::test]
async fn test_twin_is_loaded() {
    let server = MockServer::start().await;
    let mut twin = device_json("d1", "Connected");
    twin["properties"]["reported"]["firmware"] = json!("2.1.0");
    Mock::given(path("/iot/devices/d1/twin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(twin))
        .mount(&server)
        .await;

    let mut sync = DetailSync::new(client_for(&server), FAST_INTERVAL);
    sync.select(Some("d1"));
    assert!(within(sync.changed()).await);

    let state = sync.state();
    assert_eq!(sync.status(), DetailStatus::Ready);
    let pretty = state.device.and_then(|t| t.properties_pretty()).unwrap();
    assert!(pretty.contains("2.1.0"));
}

#[tokio::test]
async fn test_switching_devices_stops_old_schedule() {
    let server = MockServer::start().await;
    Mock::given(path("/iot/devices/a/twin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_json("a", "Connected")))
        .mount(&server)
        .await;
    Mock::given(path("/iot/devices/b/twin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_json("b", "Connected")))
        .mount(&server)
        .await;

    let mut sync = DetailSync::new(client_for(&server), FAST_INTERVAL);
    sync.select(Some("a"));
    assert!(within(sync.changed()).await);

    sync.select(Some("b"));
    assert!(within(sync.changed()).await);
    assert_eq!(sync.state().device.map(|t| t.device.device_id), Some("b".to_string()));

    let count_a = |requests: &[wiremock::Request]| {
        requests.iter().filter(|r| r.url.path() == "/iot/devices/a/twin").count()
    };
    let before = count_a(&server.received_requests().await.unwrap_or_default());
    tokio::time::sleep(Duration::from_millis(400)).await;
    let after = count_a(&server.received_requests().await.unwrap_or_default());

    assert_eq!(before, after);
}
