//! Integration tests for the translate endpoint.
//!
//! Tests cover:
//! - Field mapping and averaging of multi-instance metrics
//! - Failure responses and the absence of forwarding on failure
//! - Determinism across identical requests

use axum::http::StatusCode;
use serde_json::{json, Value};
use shared::models::RecordField;

use super::common::{
    double_gauge, failing_backend_app, int_gauge, otlp_payload, post_json, post_raw, test_app,
};

#[tokio::test]
async fn test_full_agent_payload() {
    let (app, forwarder) = test_app();

    let payload = otlp_payload(
        Some("5f1c2d"),
        json!([
            double_gauge("system.cpu.utilization", &[23.456]),
            double_gauge("system.memory.utilization", &[61.04]),
            int_gauge("system.storage.used_gb", &[412]),
            double_gauge("system.harddisk.used_percent", &[47.26]),
            double_gauge("system.gpu.utilization", &[10.0, 20.0, 30.0]),
            double_gauge("system.gpu.temperature", &[55.0, 60.0]),
            double_gauge("system.gpu.vram.utilization", &[12.5, 37.5]),
            double_gauge("system.ssd.health_percent", &[100.0, 96.0, 98.0])
        ]),
    );

    let (status, body) = post_json(app, "/translate", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let records = forwarder.records().unwrap();
    assert_eq!(records.len(), 1);

    let sent: Value = serde_json::from_str(&records[0].to_json().unwrap()).unwrap();
    assert_eq!(
        sent,
        json!({
            "node_id": "5f1c2d",
            "cpu_usage_percent": "23.5",
            "mem_usage_percent": "61.0",
            "used_storage_gb": "412",
            "harddisk_used_percent": "47.3",
            "gpu_usage_percent": "20.0",
            "gpu_temp": "57.5",
            "gpu_vram_percent": "25.0",
            "ssd_health_percent": "98.0"
        })
    );
}

#[tokio::test]
async fn test_node_only_payload() {
    let (app, forwarder) = test_app();

    let payload = otlp_payload(
        Some("idle-host"),
        json!([double_gauge("process.cpu.time", &[1.0])]),
    );

    let (status, _body) = post_json(app, "/translate", payload).await;
    assert_eq!(status, StatusCode::OK);

    let records = forwarder.records().unwrap();
    assert_eq!(records[0].to_json().unwrap(), r#"{"node_id":"idle-host"}"#);
}

#[tokio::test]
async fn test_storage_truncated() {
    let (app, forwarder) = test_app();

    let payload = otlp_payload(
        Some("n1"),
        json!([double_gauge("system.storage.used_gb", &[512.7])]),
    );

    let (status, _body) = post_json(app, "/translate", payload).await;
    assert_eq!(status, StatusCode::OK);

    let records = forwarder.records().unwrap();
    assert_eq!(records[0].get(RecordField::UsedStorageGb), Some("512"));
}

#[tokio::test]
async fn test_missing_resource_metrics_fails_without_forwarding() {
    let (app, forwarder) = test_app();

    let (status, body) = post_json(app, "/translate", json!({"somethingElse": true})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error during transformation");
    assert_eq!(forwarder.count().unwrap(), 0);
}

#[tokio::test]
async fn test_missing_scope_metrics_fails() {
    let (app, forwarder) = test_app();

    let payload = json!({
        "resourceMetrics": [{
            "resource": {"attributes": [{"key": "host.id", "value": {"stringValue": "n1"}}]},
            "scopeMetrics": []
        }]
    });

    let (status, body) = post_json(app, "/translate", payload).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error during transformation");
    assert_eq!(forwarder.count().unwrap(), 0);
}

#[tokio::test]
async fn test_missing_host_id_fails() {
    let (app, forwarder) = test_app();

    let payload = otlp_payload(
        None,
        json!([double_gauge("system.cpu.utilization", &[42.0])]),
    );

    let (status, body) = post_json(app, "/translate", payload).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error during transformation");
    assert_eq!(forwarder.count().unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_body_fails() {
    let (app, forwarder) = test_app();

    let (status, body) = post_raw(app, "/translate", "resourceMetrics=1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error during transformation");
    assert_eq!(forwarder.count().unwrap(), 0);
}

#[tokio::test]
async fn test_backend_failure_surfaces_as_500() {
    let app = failing_backend_app();

    let payload = otlp_payload(
        Some("n1"),
        json!([double_gauge("system.cpu.utilization", &[42.0])]),
    );

    let (status, body) = post_json(app, "/translate", payload).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error during transformation");
}

#[tokio::test]
async fn test_identical_requests_produce_identical_records() {
    let (app, forwarder) = test_app();

    let payload = otlp_payload(
        Some("n1"),
        json!([
            double_gauge("system.gpu.utilization", &[33.3, 66.6, 99.9]),
            double_gauge("system.memory.utilization", &[12.345])
        ]),
    );

    for _ in 0..2 {
        let (status, _body) = post_json(app.clone(), "/translate", payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
    }

    let records = forwarder.records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].to_json().unwrap(),
        records[1].to_json().unwrap()
    );
}

#[tokio::test]
async fn test_non_finite_and_unreadable_samples_are_skipped() {
    let (app, forwarder) = test_app();

    let payload = otlp_payload(
        Some("n1"),
        json!([
            {"name": "system.storage.used_gb", "gauge": {"dataPoints": [{"asDouble": "NaN"}]}},
            {"name": "system.gpu.temperature", "gauge": {"dataPoints": [{"asDouble": "Infinity"}, {"asDouble": 61.0}]}},
            {"name": "vendor.fan.speed", "gauge": {"dataPoints": [{"asInt": "fast"}]}}
        ]),
    );

    let (status, body) = post_json(app, "/translate", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let records = forwarder.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].to_json().unwrap(),
        r#"{"node_id":"n1","gpu_temp":"61.0"}"#
    );
}
