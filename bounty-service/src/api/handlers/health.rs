use super::super::middleware::auth::authorize;
use super::super::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, trace};
use std::sync::Arc;

pub async fn handle_health() -> impl IntoResponse {
    trace!("health check: ok");
    Json(serde_json::json!({
        "status": "healthy",
    }))
}

pub async fn handle_ready(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Err(err) = authorize(&headers, state.auth_token.as_deref()) {
        return (StatusCode::UNAUTHORIZED, err).into_response();
    }

    let ledger_ok = state.ledger.health_check().await.is_ok();
    let status = if ledger_ok { "ready" } else { "degraded" };
    if ledger_ok {
        trace!("ready check: ok ledger_ok={}", ledger_ok);
    } else {
        debug!("ready check: degraded ledger_ok={}", ledger_ok);
    }
    Json(serde_json::json!({
        "status": status,
        "ledger_ok": ledger_ok,
    }))
    .into_response()
}

pub async fn handle_metrics(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Err(err) = authorize(&headers, state.auth_token.as_deref()) {
        return (StatusCode::UNAUTHORIZED, err).into_response();
    }

    match state.metrics.encode() {
        Ok(body) => {
            let mut response = body.into_response();
            response.headers_mut().insert(axum::http::header::CONTENT_TYPE, HeaderValue::from_static("text/plain; version=0.0.4"));
            response
        }
        Err(err) => {
            debug!("metrics encode failed error={}", err);
            let mut response = format!("metrics_error: {}", err).into_response();
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}
