//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including test app setup, payload builders and HTTP request helpers.

#![allow(dead_code)]

use api::{create_router, AppState, Config, InMemoryForwarder};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;

/// Creates a test router with a fresh in-memory forwarder.
///
/// # Returns
///
/// A tuple containing the configured router and the forwarder, which can be
/// inspected for the records the router delivered.
pub fn test_app() -> (Router, Arc<InMemoryForwarder>) {
    let forwarder = Arc::new(InMemoryForwarder::new());
    let router = create_router(
        AppState::new(forwarder.clone()),
        Config::default().max_body_bytes,
    );
    (router, forwarder)
}

/// Creates a test router whose forwarder rejects every record.
pub fn failing_backend_app() -> Router {
    create_router(
        AppState::new(Arc::new(InMemoryForwarder::rejecting())),
        Config::default().max_body_bytes,
    )
}

/// Builds an OTLP/JSON metrics payload with a single resource and scope.
///
/// # Arguments
///
/// * `host_id` - Value of the `host.id` resource attribute, omitted when `None`
/// * `metrics` - The metrics array of the scope
pub fn otlp_payload(host_id: Option<&str>, metrics: Value) -> Value {
    let mut attributes = vec![json!({"key": "service.name", "value": {"stringValue": "go-agent"}})];
    if let Some(id) = host_id {
        attributes.push(json!({"key": "host.id", "value": {"stringValue": id}}));
    }

    json!({
        "resourceMetrics": [{
            "resource": {"attributes": attributes},
            "scopeMetrics": [{
                "scope": {"name": "go-agent"},
                "metrics": metrics
            }]
        }]
    })
}

/// Builds a gauge metric with one `asDouble` data point per value.
pub fn double_gauge(name: &str, values: &[f64]) -> Value {
    let points: Vec<Value> = values
        .iter()
        .map(|v| json!({"timeUnixNano": "1700000000000000000", "asDouble": v}))
        .collect();
    json!({"name": name, "gauge": {"dataPoints": points}})
}

/// Builds a gauge metric with one `asInt` data point per value, string encoded.
pub fn int_gauge(name: &str, values: &[i64]) -> Value {
    let points: Vec<Value> = values
        .iter()
        .map(|v| json!({"timeUnixNano": "1700000000000000000", "asInt": v.to_string()}))
        .collect();
    json!({"name": name, "gauge": {"dataPoints": points}})
}

/// Helper to make a POST request with a raw body.
///
/// # Arguments
///
/// * `app` - The Axum router to send the request to
/// * `uri` - The URI path to POST to
/// * `body` - The request body
///
/// # Returns
///
/// A tuple containing the response status code and the response body as text.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, String) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8_lossy(&body_bytes).into_owned();

    (status, text)
}

/// Helper to make a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, String) {
    post_raw(app, uri, serde_json::to_string(&body).unwrap()).await
}

/// Helper to make a GET request.
///
/// # Arguments
///
/// * `app` - The Axum router to send the request to
/// * `uri` - The URI path to GET from
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}
