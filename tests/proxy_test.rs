//! Proxy endpoints in front of a mocked backend.

mod common;

use common::{client_for, device_json};
use fleetdash::proxy::serve_proxy_on;
use serde_json::{json, Value};
use std::net::SocketAddr;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_proxy(backend: &MockServer) -> (String, tokio::task::JoinHandle<()>) {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let (bound, handle) = serve_proxy_on(addr, client_for(backend))
        .await
        .expect("Failed to start proxy");
    (format!("http://{}", bound), handle)
}

async fn get(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.expect("request failed");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.expect("body is not JSON");
    (status, body)
}

#[tokio::test]
async fn test_devices_are_wrapped() {
    let backend = MockServer::start().await;
    Mock::given(path("/iot/devices"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([device_json("d1", "Connected")])),
        )
        .mount(&backend)
        .await;
    let (base, handle) = start_proxy(&backend).await;

    let (status, body) = get(&format!("{}/api/devices", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["devices"][0]["deviceId"], "d1");

    handle.abort();
}

#[tokio::test]
async fn test_devices_backend_failure_is_500() {
    let backend = MockServer::start().await;
    Mock::given(path("/iot/devices"))
        .respond_with(ResponseTemplate::new(503).set_body_string("internal details"))
        .mount(&backend)
        .await;
    let (base, handle) = start_proxy(&backend).await;

    let (status, body) = get(&format!("{}/api/devices", base)).await;
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({"devices": [], "error": "Failed to fetch devices from backend service"})
    );

    handle.abort();
}

#[tokio::test]
async fn test_device_lookup() {
    let backend = MockServer::start().await;
    Mock::given(path("/iot/devices/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_json("d1", "Connected")))
        .mount(&backend)
        .await;
    Mock::given(path("/iot/devices/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&backend)
        .await;
    Mock::given(path("/iot/devices/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("trace"))
        .mount(&backend)
        .await;
    let (base, handle) = start_proxy(&backend).await;

    let (status, body) = get(&format!("{}/api/device/d1", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["device"]["deviceId"], "d1");

    let (status, body) = get(&format!("{}/api/device/gone", base)).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Device with ID gone not found"}));

    let (status, body) = get(&format!("{}/api/device/broken", base)).await;
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({"error": "Failed to fetch device broken from backend service"})
    );

    handle.abort();
}

#[tokio::test]
async fn test_malformed_device_ids() {
    let backend = MockServer::start().await;
    let (base, handle) = start_proxy(&backend).await;

    for suffix in ["/api/device", "/api/device/", "/api/device/a%2Fb", "/api/device/a%20b"] {
        let (status, body) = get(&format!("{}{}", base, suffix)).await;
        assert_eq!(status, 400, "{} should be rejected", suffix);
        assert_eq!(body, json!({"error": "Invalid device ID"}));
    }

    let too_long = "x".repeat(129);
    let (status, _) = get(&format!("{}/api/device/{}", base, too_long)).await;
    assert_eq!(status, 400);

    // Nothing reached the backend.
    assert!(backend.received_requests().await.unwrap_or_default().is_empty());
    handle.abort();
}

#[tokio::test]
async fn test_health() {
    let backend = MockServer::start().await;
    Mock::given(path("/iot-status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&backend)
        .await;
    let (base, handle) = start_proxy(&backend).await;

    let (status, body) = get(&format!("{}/api/health", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Backend is healthy");
    assert!(body["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));

    handle.abort();
}

#[tokio::test]
async fn test_health_failure() {
    let backend = MockServer::start().await;
    Mock::given(path("/iot-status/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend)
        .await;
    let (base, handle) = start_proxy(&backend).await;

    let (status, body) = get(&format!("{}/api/health", base)).await;
    assert_eq!(status, 500);
    assert_eq!(body["message"], "Failed to connect to backend service");
    assert!(body["timestamp"].is_string());

    handle.abort();
}
