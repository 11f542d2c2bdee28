mod harness;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bounty_core::domain::model::TrackerEvent;
use bounty_core::infrastructure::ledger::InMemoryLedger;
use bounty_core::infrastructure::webhook::SignatureValidator;
use bounty_service::api::{build_router, AppState};
use bounty_service::service::metrics::Metrics;
use harness::RecordingProcessor;
use hmac::{Hmac, Mac};
use secrecy::SecretString;
use sha2::Sha256;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const SECRET: &str = "hook-secret";

fn test_state(auth_token: Option<&str>) -> (Arc<RecordingProcessor>, Arc<AppState>) {
    let processor = Arc::new(RecordingProcessor::new());
    let state = Arc::new(AppState {
        processor: processor.clone(),
        ledger: Arc::new(InMemoryLedger::new()),
        signature: SignatureValidator::new(SecretString::from(SECRET)),
        metrics: Arc::new(Metrics::new().expect("metrics")),
        auth_token: auth_token.map(str::to_string),
    });
    (processor, state)
}

fn sign(body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

fn labeled_bounty_body() -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "action": "labeled",
        "label": { "name": "bounty" },
        "issue": { "number": 1347, "labels": [{ "name": "bounty" }] },
        "repository": { "id": 1296269, "full_name": "octo/demo" },
    }))
    .unwrap()
}

async fn deliver(
    router: &Router,
    event: &str,
    body: Vec<u8>,
    signature: Option<String>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-github-event", event)
        .header("x-github-delivery", "72d3162e-cc78-11e3-81ab-4c9367dc0958");
    if let Some(signature) = signature {
        builder = builder.header("x-hub-signature-256", signature);
    }
    let request = builder.body(Body::from(body)).expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(router: &Router, path: &str, bearer: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    (status, String::from_utf8_lossy(&bytes).to_string())
}

/// The handler hands events to a spawned task; give it a moment to land.
async fn wait_for_events(processor: &RecordingProcessor, expected: usize) -> Vec<TrackerEvent> {
    for _ in 0..50 {
        let events = processor.events();
        if events.len() >= expected {
            return events;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    processor.events()
}

#[tokio::test]
async fn signed_delivery_is_accepted_and_dispatched() {
    let (processor, state) = test_state(None);
    let router = build_router(state.clone());

    let body = labeled_bounty_body();
    let signature = sign(&body);
    let (status, json) = deliver(&router, "issues", body, Some(signature)).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["status"], "accepted");

    let events = wait_for_events(&processor, 1).await;
    assert_eq!(events.len(), 1);
    match &events[0] {
        TrackerEvent::LabelAdded { issue, label, .. } => {
            assert_eq!(label, "bounty");
            assert_eq!(issue.scope.repository.value(), 1296269);
            assert_eq!(issue.scope.issue.value(), 1347);
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(state.metrics.snapshot().deliveries_accepted, 1);
}

#[tokio::test]
async fn tampered_delivery_is_rejected_before_parsing() {
    let (processor, state) = test_state(None);
    let router = build_router(state.clone());

    let body = labeled_bounty_body();
    let signature = sign(b"some other body");
    let (status, json) = deliver(&router, "issues", body, Some(signature)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["status"], "invalid signature");
    assert!(processor.events().is_empty());
    assert_eq!(state.metrics.snapshot().deliveries_rejected, 1);
}

#[tokio::test]
async fn ping_and_foreign_events_do_not_dispatch() {
    let (processor, state) = test_state(None);
    let router = build_router(state.clone());

    let ping_body = br#"{"zen":"design for failure"}"#.to_vec();
    let signature = sign(&ping_body);
    let (status, json) = deliver(&router, "ping", ping_body, Some(signature)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "pong");

    let push_body = br#"{"ref":"refs/heads/main"}"#.to_vec();
    let signature = sign(&push_body);
    let (status, json) = deliver(&router, "push", push_body, Some(signature)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["status"], "ignored");

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(processor.events().is_empty());
}

#[tokio::test]
async fn responses_echo_the_delivery_id_without_disturbing_the_status() {
    let (_processor, state) = test_state(None);
    let router = build_router(state);

    let body = labeled_bounty_body();
    let signature = sign(&body);
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-github-event", "issues")
        .header("x-github-delivery", "72d3162e-cc78-11e3-81ab-4c9367dc0958")
        .header("x-hub-signature-256", signature)
        .body(Body::from(body))
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("72d3162e-cc78-11e3-81ab-4c9367dc0958")
    );

    // No delivery id on the wire still yields a generated id, never an error.
    let request = Request::builder().method("GET").uri("/health").body(Body::empty()).expect("request");
    let response = router.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn health_and_ready_report_the_service_state() {
    let (_processor, state) = test_state(None);
    let router = build_router(state);

    let (status, body) = get(&router, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));

    let (status, body) = get(&router, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ready"));
}

#[tokio::test]
async fn metrics_endpoint_honors_the_bearer_token() {
    let (_processor, state) = test_state(Some("metrics-token"));
    let router = build_router(state.clone());

    let body = labeled_bounty_body();
    let signature = sign(&body);
    deliver(&router, "issues", body, Some(signature)).await;

    let (status, _body) = get(&router, "/metrics", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(&router, "/metrics", Some("metrics-token")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("webhook_deliveries_total"));

    let (status, _body) = get(&router, "/ready", Some("metrics-token")).await;
    assert_eq!(status, StatusCode::OK);
}
