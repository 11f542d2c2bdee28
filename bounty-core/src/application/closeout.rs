//! The close flow.
//!
//! Entered from a `bounty:manual-close` labeling or from an issue-closed
//! event on an enabled bounty. Closing a scope that was never initialized
//! is a defined failure with no ledger write, not a race to resolve.

use crate::application::event_processor::{EventDisposition, ReconcileContext};
use crate::application::reconcile::{clear_vocabulary, note_transition, settle_failure};
use crate::domain::comment::{
    bounty_closed_body, close_failed_body, explorer_url, NOT_INITIALIZED_MESSAGE,
};
use crate::domain::label::BountyLabel;
use crate::domain::lifecycle::BountyState;
use crate::domain::model::{IssueRef, IssueSnapshot};
use crate::foundation::Result;
use log::{info, warn};

pub(crate) async fn close_requested(
    context: &ReconcileContext,
    issue: &IssueRef,
    snapshot: &IssueSnapshot,
    trigger: Option<BountyLabel>,
) -> Result<EventDisposition> {
    let scope = issue.scope;
    info!("close requested issue={}", scope);
    clear_vocabulary(context, issue, &snapshot.labels, trigger).await?;

    let record = match context.ledger.fetch_record(scope).await {
        Ok(record) => record,
        Err(err) => {
            warn!("ledger read failed issue={} err={}", scope, err);
            settle_failure(context, issue, None, BountyLabel::CloseFailed, &close_failed_body(&err.diagnostic()))
                .await?;
            return Ok(EventDisposition::CloseFailed);
        }
    };

    let Some(record) = record else {
        info!("close rejected, no record issue={}", scope);
        settle_failure(context, issue, None, BountyLabel::CloseFailed, &close_failed_body(NOT_INITIALIZED_MESSAGE))
            .await?;
        return Ok(EventDisposition::CloseFailed);
    };

    if record.is_closed {
        note_transition(scope, BountyState::Enabled, BountyState::Closed);
        context.tracker.add_label(issue, BountyLabel::Closed.as_str()).await?;
        info!("close resynced issue={}", scope);
        return Ok(EventDisposition::Resynced);
    }

    close(context, issue, snapshot.assignee.as_deref()).await
}

async fn close(
    context: &ReconcileContext,
    issue: &IssueRef,
    bounty_hunter: Option<&str>,
) -> Result<EventDisposition> {
    let scope = issue.scope;
    note_transition(scope, BountyState::Enabled, BountyState::Closing);
    context.tracker.add_label(issue, BountyLabel::Closing.as_str()).await?;

    if let Err(err) = context.ledger.simulate_close(scope, bounty_hunter).await {
        warn!("close simulation rejected issue={} err={}", scope, err);
        note_transition(scope, BountyState::Closing, BountyState::CloseFailed);
        settle_failure(
            context,
            issue,
            Some(BountyLabel::Closing),
            BountyLabel::CloseFailed,
            &close_failed_body(&err.diagnostic()),
        )
        .await?;
        return Ok(EventDisposition::CloseFailed);
    }

    match context.ledger.commit_close(scope, bounty_hunter).await {
        Ok(signature) => {
            note_transition(scope, BountyState::Closing, BountyState::Closed);
            context.tracker.remove_label(issue, BountyLabel::Closing.as_str()).await?;
            context.tracker.add_label(issue, BountyLabel::Closed.as_str()).await?;
            let link = explorer_url(signature.as_str(), &context.rpc_url);
            context.tracker.create_comment(issue, &bounty_closed_body(&link, bounty_hunter)).await?;
            info!("bounty closed issue={} signature={}", scope, signature);
            Ok(EventDisposition::Closed)
        }
        Err(err) => {
            warn!("close commit failed issue={} err={}", scope, err);
            note_transition(scope, BountyState::Closing, BountyState::CloseFailed);
            settle_failure(
                context,
                issue,
                Some(BountyLabel::Closing),
                BountyLabel::CloseFailed,
                &close_failed_body(&err.diagnostic()),
            )
            .await?;
            Ok(EventDisposition::CloseFailed)
        }
    }
}
