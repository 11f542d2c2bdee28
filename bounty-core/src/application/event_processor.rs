//! Event routing and the processor seam the service drives.

use crate::application::{closeout, commands, reconcile};
use crate::domain::label::BountyLabel;
use crate::domain::model::TrackerEvent;
use crate::foundation::Result;
use crate::infrastructure::ledger::BountyLedger;
use crate::infrastructure::tracker::IssueTracker;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Collaborators one reconciliation flow needs.
#[derive(Clone)]
pub struct ReconcileContext {
    pub tracker: Arc<dyn IssueTracker>,
    pub ledger: Arc<dyn BountyLedger>,
    /// Ledger RPC endpoint, used only to build inspection links.
    pub rpc_url: String,
}

impl ReconcileContext {
    pub fn new(tracker: Arc<dyn IssueTracker>, ledger: Arc<dyn BountyLedger>, rpc_url: impl Into<String>) -> Self {
        Self { tracker, ledger, rpc_url: rpc_url.into() }
    }
}

/// How a delivered event was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Ledger truth already matched; labels realigned without a write.
    Resynced,
    Initialized,
    InitializeFailed,
    Closed,
    CloseFailed,
    /// A well-formed transfer command passed validation.
    CommandRecognized,
    Ignored,
}

impl EventDisposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resynced => "resynced",
            Self::Initialized => "initialized",
            Self::InitializeFailed => "initialize_failed",
            Self::Closed => "closed",
            Self::CloseFailed => "close_failed",
            Self::CommandRecognized => "command_recognized",
            Self::Ignored => "ignored",
        }
    }
}

/// Drives one delivered event to its terminal outcome.
///
/// Ledger failures resolve inside the flow as `bounty:failed` or
/// `bounty:close-failed` labels and still report `Ok`; only tracker
/// faults that prevented the label from settling surface as `Err`.
#[async_trait]
pub trait EventProcessor: Send + Sync {
    async fn process(&self, event: TrackerEvent) -> Result<EventDisposition>;
}

pub struct ReconcileEngine {
    context: ReconcileContext,
}

impl ReconcileEngine {
    pub fn new(context: ReconcileContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl EventProcessor for ReconcileEngine {
    async fn process(&self, event: TrackerEvent) -> Result<EventDisposition> {
        process_tracker_event(&self.context, event).await
    }
}

pub async fn process_tracker_event(
    context: &ReconcileContext,
    event: TrackerEvent,
) -> Result<EventDisposition> {
    match event {
        TrackerEvent::LabelAdded { issue, snapshot, label } => match BountyLabel::from_name(&label) {
            Some(BountyLabel::Bounty) => reconcile::bounty_requested(context, &issue, &snapshot).await,
            Some(BountyLabel::ManualClose) => {
                closeout::close_requested(context, &issue, &snapshot, Some(BountyLabel::ManualClose)).await
            }
            _ => {
                debug!("label ignored issue={} label={}", issue.scope, label);
                Ok(EventDisposition::Ignored)
            }
        },
        // Advisory only. The next bounty labeling reconciles from ledger
        // truth, so removal needs no bookkeeping here.
        TrackerEvent::LabelRemoved { issue, label } => {
            debug!("label removed issue={} label={}", issue.scope, label);
            Ok(EventDisposition::Ignored)
        }
        TrackerEvent::IssueClosed { issue, snapshot } => {
            if snapshot.labels.iter().any(|name| name == BountyLabel::Enabled.as_str()) {
                closeout::close_requested(context, &issue, &snapshot, None).await
            } else {
                debug!("issue closed without an enabled bounty issue={}", issue.scope);
                Ok(EventDisposition::Ignored)
            }
        }
        TrackerEvent::CommentCreated { issue, author, body } => {
            commands::comment_created(&issue, &author, &body).await
        }
    }
}
