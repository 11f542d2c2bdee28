//! Webhook ingress.
//!
//! Every delivery is authenticated against its HMAC signature before the
//! body is even parsed. Decoded events are handed to the processor on a
//! spawned task so slow ledger round trips never back-pressure delivery;
//! the tracker retries undelivered webhooks, the engine does not.

use super::super::middleware::correlation::CorrelationId;
use super::super::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Extension;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bounty_core::infrastructure::webhook::parse_event;
use std::sync::Arc;
use tracing::{debug, info, warn};

const EVENT_HEADER: &str = "x-github-event";
const SIGNATURE_HEADER: &str = "x-hub-signature-256";
const DELIVERY_HEADER: &str = "x-github-delivery";

const EVENT_PING: &str = "ping";

fn reply(status: StatusCode, body_status: &str) -> Response {
    (status, Json(serde_json::json!({ "status": body_status }))).into_response()
}

pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    correlation: Option<Extension<CorrelationId>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let delivery = headers.get(DELIVERY_HEADER).and_then(|v| v.to_str().ok()).unwrap_or("").to_string();

    let Some(event_kind) = headers.get(EVENT_HEADER).and_then(|v| v.to_str().ok()).map(str::to_string) else {
        warn!(delivery = %delivery, "delivery missing event header");
        state.metrics.inc_delivery("unknown", "invalid_payload");
        return reply(StatusCode::BAD_REQUEST, "missing event header");
    };

    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        warn!(delivery = %delivery, event = %event_kind, "delivery missing signature header");
        state.metrics.inc_delivery(&event_kind, "rejected_signature");
        return reply(StatusCode::UNAUTHORIZED, "missing signature");
    };
    if let Err(err) = state.signature.verify(&body, signature) {
        warn!(delivery = %delivery, event = %event_kind, error = %err, "delivery signature rejected");
        state.metrics.inc_delivery(&event_kind, "rejected_signature");
        return reply(StatusCode::UNAUTHORIZED, "invalid signature");
    }

    if event_kind == EVENT_PING {
        debug!(delivery = %delivery, "ping delivery acknowledged");
        return reply(StatusCode::OK, "pong");
    }

    let event = match parse_event(&event_kind, &body) {
        Ok(Some(event)) => event,
        Ok(None) => {
            debug!(delivery = %delivery, event = %event_kind, "delivery carries no engine event");
            state.metrics.inc_delivery(&event_kind, "ignored");
            return reply(StatusCode::ACCEPTED, "ignored");
        }
        Err(err) => {
            warn!(delivery = %delivery, event = %event_kind, error = %err, "delivery payload rejected");
            state.metrics.inc_delivery(&event_kind, "invalid_payload");
            return reply(StatusCode::BAD_REQUEST, "invalid payload");
        }
    };

    state.metrics.inc_delivery(&event_kind, "accepted");
    let correlation = correlation.map(|Extension(id)| id.0).unwrap_or(delivery);
    info!(
        correlation_id = %correlation,
        event = %event_kind,
        kind = event.kind(),
        issue = %event.issue().scope,
        "delivery dispatched"
    );

    // At-most-once per delivery: the handler runs to its terminal label or
    // to a tracker fault, never retried here.
    let processor = state.processor.clone();
    tokio::spawn(async move {
        match processor.process(event).await {
            Ok(disposition) => {
                info!(correlation_id = %correlation, disposition = disposition.as_str(), "delivery resolved");
            }
            Err(err) => {
                warn!(correlation_id = %correlation, error = %err, "delivery handler failed against the tracker");
            }
        }
    });

    reply(StatusCode::ACCEPTED, "accepted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::metrics::Metrics;
    use async_trait::async_trait;
    use bounty_core::application::{EventDisposition, EventProcessor};
    use bounty_core::domain::model::TrackerEvent;
    use bounty_core::foundation::Result;
    use bounty_core::infrastructure::ledger::InMemoryLedger;
    use bounty_core::infrastructure::webhook::SignatureValidator;
    use hmac::{Hmac, Mac};
    use secrecy::SecretString;
    use sha2::Sha256;

    const SECRET: &str = "hook-secret";

    struct NoopProcessor;

    #[async_trait]
    impl EventProcessor for NoopProcessor {
        async fn process(&self, _event: TrackerEvent) -> Result<EventDisposition> {
            Ok(EventDisposition::Ignored)
        }
    }

    fn dummy_state() -> Arc<AppState> {
        Arc::new(AppState {
            processor: Arc::new(NoopProcessor),
            ledger: Arc::new(InMemoryLedger::new()),
            signature: SignatureValidator::new(SecretString::from(SECRET)),
            metrics: Arc::new(Metrics::new().expect("metrics")),
            auth_token: None,
        })
    }

    fn signature_for(body: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    fn signed_headers(event: &str, body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(EVENT_HEADER, event.parse().unwrap());
        headers.insert(SIGNATURE_HEADER, signature_for(body).parse().unwrap());
        headers
    }

    #[tokio::test]
    async fn missing_event_header_is_a_bad_request() {
        let state = dummy_state();
        let response =
            handle_webhook(State(state.clone()), None, HeaderMap::new(), Bytes::from_static(b"{}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsigned_delivery_is_unauthorized() {
        let state = dummy_state();
        let mut headers = HeaderMap::new();
        headers.insert(EVENT_HEADER, "issues".parse().unwrap());
        let response =
            handle_webhook(State(state.clone()), None, headers, Bytes::from_static(b"{}")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(state.metrics.snapshot().deliveries_rejected, 1);
    }

    #[tokio::test]
    async fn signed_ping_is_answered_without_dispatch() {
        let state = dummy_state();
        let body = Bytes::from_static(b"{\"zen\":\"keep it logically awesome\"}");
        let headers = signed_headers("ping", &body);
        let response = handle_webhook(State(state.clone()), None, headers, body).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.metrics.snapshot().deliveries_accepted, 0);
    }

    #[tokio::test]
    async fn garbage_payload_is_a_bad_request() {
        let state = dummy_state();
        let body = Bytes::from_static(b"not json");
        let headers = signed_headers("issues", &body);
        let response = handle_webhook(State(state.clone()), None, headers, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
