//! Service assembly: ports, metrics and the event processor in one place.

use crate::service::metrics::Metrics;
use async_trait::async_trait;
use bounty_core::application::{
    process_tracker_event, EventDisposition, EventProcessor, ReconcileContext,
};
use bounty_core::domain::model::{BountyScope, IssueRef, TrackerEvent};
use bounty_core::domain::record::BountyRecord;
use bounty_core::foundation::{Result, TxSignature};
use bounty_core::infrastructure::config::AppConfig;
use bounty_core::infrastructure::ledger::{BountyLedger, SolanaLedger};
use bounty_core::infrastructure::tracker::{GitHubTracker, IssueTracker};
use std::sync::Arc;
use tracing::warn;

pub struct ServiceFlow {
    context: ReconcileContext,
    ledger: Arc<dyn BountyLedger>,
    metrics: Arc<Metrics>,
}

impl ServiceFlow {
    /// Wires the production collaborators from configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let tracker = Arc::new(GitHubTracker::new(&config.tracker)?);
        let ledger = Arc::new(SolanaLedger::new(&config.ledger)?);
        Self::with_ports(tracker, ledger, &config.ledger.rpc_url)
    }

    /// Wires arbitrary port implementations; tests hand in recording mocks.
    pub fn with_ports(
        tracker: Arc<dyn IssueTracker>,
        ledger: Arc<dyn BountyLedger>,
        rpc_url: &str,
    ) -> Result<Self> {
        let metrics = Arc::new(Metrics::new()?);
        let tracker = Arc::new(InstrumentedTracker { inner: tracker, metrics: metrics.clone() });
        let ledger: Arc<dyn BountyLedger> =
            Arc::new(InstrumentedLedger { inner: ledger, metrics: metrics.clone() });
        let context = ReconcileContext::new(tracker, ledger.clone(), rpc_url);
        Ok(Self { context, ledger, metrics })
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        self.metrics.clone()
    }

    pub fn ledger(&self) -> Arc<dyn BountyLedger> {
        self.ledger.clone()
    }
}

#[async_trait]
impl EventProcessor for ServiceFlow {
    async fn process(&self, event: TrackerEvent) -> Result<EventDisposition> {
        match process_tracker_event(&self.context, event).await {
            Ok(disposition) => {
                self.metrics.inc_flow(disposition.as_str());
                Ok(disposition)
            }
            Err(err) => {
                // Ledger failures settle inside the flow; only a tracker
                // fault surfaces here, leaving the labels where they were.
                warn!(error = %err, "reconcile flow could not settle the tracker");
                self.metrics.inc_flow("tracker_fault");
                Err(err)
            }
        }
    }
}

struct InstrumentedTracker {
    inner: Arc<dyn IssueTracker>,
    metrics: Arc<Metrics>,
}

#[async_trait]
impl IssueTracker for InstrumentedTracker {
    async fn add_label(&self, issue: &IssueRef, label: &str) -> Result<()> {
        let result = self.inner.add_label(issue, label).await;
        self.metrics.inc_tracker_call("add_label", result.is_ok());
        result
    }

    async fn remove_label(&self, issue: &IssueRef, label: &str) -> Result<()> {
        let result = self.inner.remove_label(issue, label).await;
        self.metrics.inc_tracker_call("remove_label", result.is_ok());
        result
    }

    async fn create_comment(&self, issue: &IssueRef, body: &str) -> Result<()> {
        let result = self.inner.create_comment(issue, body).await;
        self.metrics.inc_tracker_call("create_comment", result.is_ok());
        result
    }
}

struct InstrumentedLedger {
    inner: Arc<dyn BountyLedger>,
    metrics: Arc<Metrics>,
}

#[async_trait]
impl BountyLedger for InstrumentedLedger {
    async fn fetch_record(&self, scope: BountyScope) -> Result<Option<BountyRecord>> {
        let result = self.inner.fetch_record(scope).await;
        self.metrics.inc_ledger_call("fetch_record", result.is_ok());
        result
    }

    async fn simulate_initialize(&self, scope: BountyScope) -> Result<()> {
        let result = self.inner.simulate_initialize(scope).await;
        self.metrics.inc_ledger_call("simulate_initialize", result.is_ok());
        result
    }

    async fn commit_initialize(&self, scope: BountyScope) -> Result<TxSignature> {
        let result = self.inner.commit_initialize(scope).await;
        self.metrics.inc_ledger_call("commit_initialize", result.is_ok());
        result
    }

    async fn simulate_close(&self, scope: BountyScope, bounty_hunter: Option<&str>) -> Result<()> {
        let result = self.inner.simulate_close(scope, bounty_hunter).await;
        self.metrics.inc_ledger_call("simulate_close", result.is_ok());
        result
    }

    async fn commit_close(&self, scope: BountyScope, bounty_hunter: Option<&str>) -> Result<TxSignature> {
        let result = self.inner.commit_close(scope, bounty_hunter).await;
        self.metrics.inc_ledger_call("commit_close", result.is_ok());
        result
    }

    async fn health_check(&self) -> Result<()> {
        self.inner.health_check().await
    }
}
