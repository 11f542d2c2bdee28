use crate::service::metrics::Metrics;
use bounty_core::application::EventProcessor;
use bounty_core::infrastructure::ledger::BountyLedger;
use bounty_core::infrastructure::webhook::SignatureValidator;
use std::sync::Arc;

pub struct AppState {
    pub processor: Arc<dyn EventProcessor>,
    /// Probed by the ready endpoint; the reconcile flows hold their own handle.
    pub ledger: Arc<dyn BountyLedger>,
    pub signature: SignatureValidator,
    pub metrics: Arc<Metrics>,
    /// Bearer token for the ready and metrics endpoints, when configured.
    pub auth_token: Option<String>,
}
