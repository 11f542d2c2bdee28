use bounty_core::foundation::BountyError;
use log::debug;
use prometheus::{Encoder, IntCounterVec, Registry, TextEncoder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub uptime: Duration,
    pub deliveries_accepted: u64,
    pub deliveries_ignored: u64,
    pub deliveries_rejected: u64,
    pub flows_settled: u64,
    pub flows_failed: u64,
    pub ledger_commits_ok: u64,
    pub ledger_commits_failed: u64,
}

pub struct Metrics {
    registry: Registry,
    webhook_deliveries_total: IntCounterVec,
    reconcile_flows_total: IntCounterVec,
    ledger_calls_total: IntCounterVec,
    tracker_calls_total: IntCounterVec,
    started_at: Instant,
    deliveries_accepted: AtomicU64,
    deliveries_ignored: AtomicU64,
    deliveries_rejected: AtomicU64,
    flows_settled: AtomicU64,
    flows_failed: AtomicU64,
    ledger_commits_ok: AtomicU64,
    ledger_commits_failed: AtomicU64,
}

impl Metrics {
    pub fn new() -> Result<Self, BountyError> {
        debug!("initializing prometheus metrics");
        let registry = Registry::new();
        let webhook_deliveries_total = IntCounterVec::new(
            prometheus::Opts::new("webhook_deliveries_total", "Webhook deliveries by event and outcome"),
            &["event", "outcome"],
        )
        .map_err(|err| BountyError::Message(err.to_string()))?;
        let reconcile_flows_total = IntCounterVec::new(
            prometheus::Opts::new("reconcile_flows_total", "Reconciliation flows by disposition"),
            &["disposition"],
        )
        .map_err(|err| BountyError::Message(err.to_string()))?;
        let ledger_calls_total = IntCounterVec::new(
            prometheus::Opts::new("ledger_calls_total", "Ledger calls by operation and status"),
            &["operation", "status"],
        )
        .map_err(|err| BountyError::Message(err.to_string()))?;
        let tracker_calls_total = IntCounterVec::new(
            prometheus::Opts::new("tracker_calls_total", "Tracker calls by operation and status"),
            &["operation", "status"],
        )
        .map_err(|err| BountyError::Message(err.to_string()))?;

        registry.register(Box::new(webhook_deliveries_total.clone())).map_err(|err| BountyError::Message(err.to_string()))?;
        registry.register(Box::new(reconcile_flows_total.clone())).map_err(|err| BountyError::Message(err.to_string()))?;
        registry.register(Box::new(ledger_calls_total.clone())).map_err(|err| BountyError::Message(err.to_string()))?;
        registry.register(Box::new(tracker_calls_total.clone())).map_err(|err| BountyError::Message(err.to_string()))?;

        let out = Self {
            registry,
            webhook_deliveries_total,
            reconcile_flows_total,
            ledger_calls_total,
            tracker_calls_total,
            started_at: Instant::now(),
            deliveries_accepted: AtomicU64::new(0),
            deliveries_ignored: AtomicU64::new(0),
            deliveries_rejected: AtomicU64::new(0),
            flows_settled: AtomicU64::new(0),
            flows_failed: AtomicU64::new(0),
            ledger_commits_ok: AtomicU64::new(0),
            ledger_commits_failed: AtomicU64::new(0),
        };
        debug!("prometheus metrics registered metric_count=4");
        Ok(out)
    }

    pub fn inc_delivery(&self, event: &str, outcome: &str) {
        self.webhook_deliveries_total.with_label_values(&[event, outcome]).inc();
        match outcome {
            "accepted" => {
                self.deliveries_accepted.fetch_add(1, Ordering::Relaxed);
            }
            "ignored" => {
                self.deliveries_ignored.fetch_add(1, Ordering::Relaxed);
            }
            "rejected_signature" | "invalid_payload" => {
                self.deliveries_rejected.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    pub fn inc_flow(&self, disposition: &str) {
        self.reconcile_flows_total.with_label_values(&[disposition]).inc();
        if disposition == "tracker_fault" {
            self.flows_failed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.flows_settled.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn inc_ledger_call(&self, operation: &str, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        self.ledger_calls_total.with_label_values(&[operation, status]).inc();
        if operation.starts_with("commit_") {
            if ok {
                self.ledger_commits_ok.fetch_add(1, Ordering::Relaxed);
            } else {
                self.ledger_commits_failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn inc_tracker_call(&self, operation: &str, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        self.tracker_calls_total.with_label_values(&[operation, status]).inc();
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime: self.started_at.elapsed(),
            deliveries_accepted: self.deliveries_accepted.load(Ordering::Relaxed),
            deliveries_ignored: self.deliveries_ignored.load(Ordering::Relaxed),
            deliveries_rejected: self.deliveries_rejected.load(Ordering::Relaxed),
            flows_settled: self.flows_settled.load(Ordering::Relaxed),
            flows_failed: self.flows_failed.load(Ordering::Relaxed),
            ledger_commits_ok: self.ledger_commits_ok.load(Ordering::Relaxed),
            ledger_commits_failed: self.ledger_commits_failed.load(Ordering::Relaxed),
        }
    }

    pub fn encode(&self) -> Result<String, BountyError> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer).map_err(|err| BountyError::Message(err.to_string()))?;
        let output = String::from_utf8(buffer).map_err(|err| BountyError::Message(err.to_string()))?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_feed_the_snapshot() {
        let metrics = Metrics::new().expect("metrics");

        metrics.inc_delivery("issues", "accepted");
        metrics.inc_delivery("issues", "ignored");
        metrics.inc_delivery("issue_comment", "rejected_signature");
        metrics.inc_flow("initialized");
        metrics.inc_flow("tracker_fault");
        metrics.inc_ledger_call("commit_initialize", true);
        metrics.inc_ledger_call("commit_close", false);
        metrics.inc_ledger_call("fetch_record", true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.deliveries_accepted, 1);
        assert_eq!(snapshot.deliveries_ignored, 1);
        assert_eq!(snapshot.deliveries_rejected, 1);
        assert_eq!(snapshot.flows_settled, 1);
        assert_eq!(snapshot.flows_failed, 1);
        assert_eq!(snapshot.ledger_commits_ok, 1);
        assert_eq!(snapshot.ledger_commits_failed, 1);
    }

    #[test]
    fn encoded_exposition_names_the_counters() {
        let metrics = Metrics::new().expect("metrics");
        metrics.inc_delivery("issues", "accepted");
        metrics.inc_tracker_call("add_label", true);

        let body = metrics.encode().expect("encode");
        assert!(body.contains("webhook_deliveries_total"));
        assert!(body.contains("tracker_calls_total"));
    }
}
