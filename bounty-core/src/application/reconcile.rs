//! The bounty request flow.
//!
//! A `bounty` labeling either resyncs the issue against an existing
//! ledger record or drives the initialize write path. Either way the
//! issue always leaves the flow with exactly one lifecycle label.

use crate::application::event_processor::{EventDisposition, ReconcileContext};
use crate::domain::comment::{bounty_enabled_body, bounty_failed_body, explorer_url};
use crate::domain::label::{vocabulary_labels, BountyLabel};
use crate::domain::lifecycle::{validate_transition, BountyState};
use crate::domain::model::{BountyScope, IssueRef, IssueSnapshot};
use crate::foundation::Result;
use log::{info, warn};

/// Checks a lifecycle move against the transition table before the labels
/// change. Every flow path is a valid transition; a hit here means a flow
/// regressed, not that the event is bad, so it logs and carries on.
pub(crate) fn note_transition(scope: BountyScope, from: BountyState, to: BountyState) {
    let check = validate_transition(from, to);
    if !check.valid {
        warn!(
            "unexpected lifecycle transition issue={} from={} to={}",
            scope, check.from_state, check.to_state
        );
    }
}

/// Strips every vocabulary label the issue carries. The trigger label is
/// removed even when the delivered snapshot predates it.
pub(crate) async fn clear_vocabulary(
    context: &ReconcileContext,
    issue: &IssueRef,
    current: &[String],
    trigger: Option<BountyLabel>,
) -> Result<()> {
    let mut stale = vocabulary_labels(current);
    if let Some(trigger) = trigger {
        if !stale.contains(&trigger) {
            stale.push(trigger);
        }
    }
    for label in stale {
        context.tracker.remove_label(issue, label.as_str()).await?;
    }
    Ok(())
}

/// Swaps the in-flight label for the terminal one and leaves the
/// diagnostic on the issue.
pub(crate) async fn settle_failure(
    context: &ReconcileContext,
    issue: &IssueRef,
    standing: Option<BountyLabel>,
    target: BountyLabel,
    body: &str,
) -> Result<()> {
    if let Some(label) = standing {
        context.tracker.remove_label(issue, label.as_str()).await?;
    }
    context.tracker.add_label(issue, target.as_str()).await?;
    context.tracker.create_comment(issue, body).await?;
    Ok(())
}

pub(crate) async fn bounty_requested(
    context: &ReconcileContext,
    issue: &IssueRef,
    snapshot: &IssueSnapshot,
) -> Result<EventDisposition> {
    let scope = issue.scope;
    info!("bounty requested issue={}", scope);
    clear_vocabulary(context, issue, &snapshot.labels, Some(BountyLabel::Bounty)).await?;

    let record = match context.ledger.fetch_record(scope).await {
        Ok(record) => record,
        Err(err) => {
            warn!("ledger read failed issue={} err={}", scope, err);
            settle_failure(context, issue, None, BountyLabel::Failed, &bounty_failed_body(&err.diagnostic()))
                .await?;
            return Ok(EventDisposition::InitializeFailed);
        }
    };

    if let Some(record) = record {
        // Already settled on the ledger. Reflect it, write nothing,
        // say nothing.
        let state = if record.is_closed { BountyState::Closed } else { BountyState::Enabled };
        note_transition(scope, BountyState::Requested, state);
        let target = state.label();
        context.tracker.add_label(issue, target.as_str()).await?;
        info!("bounty resynced issue={} label={}", scope, target);
        return Ok(EventDisposition::Resynced);
    }

    initialize(context, issue).await
}

async fn initialize(context: &ReconcileContext, issue: &IssueRef) -> Result<EventDisposition> {
    let scope = issue.scope;
    note_transition(scope, BountyState::Requested, BountyState::Processing);
    context.tracker.add_label(issue, BountyLabel::Processing.as_str()).await?;

    if let Err(err) = context.ledger.simulate_initialize(scope).await {
        warn!("initialize simulation rejected issue={} err={}", scope, err);
        note_transition(scope, BountyState::Processing, BountyState::Failed);
        settle_failure(
            context,
            issue,
            Some(BountyLabel::Processing),
            BountyLabel::Failed,
            &bounty_failed_body(&err.diagnostic()),
        )
        .await?;
        return Ok(EventDisposition::InitializeFailed);
    }

    match context.ledger.commit_initialize(scope).await {
        Ok(signature) => {
            note_transition(scope, BountyState::Processing, BountyState::Enabled);
            context.tracker.remove_label(issue, BountyLabel::Processing.as_str()).await?;
            context.tracker.add_label(issue, BountyLabel::Enabled.as_str()).await?;
            let link = explorer_url(signature.as_str(), &context.rpc_url);
            context.tracker.create_comment(issue, &bounty_enabled_body(&link)).await?;
            info!("bounty enabled issue={} signature={}", scope, signature);
            Ok(EventDisposition::Initialized)
        }
        Err(err) => {
            warn!("initialize commit failed issue={} err={}", scope, err);
            note_transition(scope, BountyState::Processing, BountyState::Failed);
            settle_failure(
                context,
                issue,
                Some(BountyLabel::Processing),
                BountyLabel::Failed,
                &bounty_failed_body(&err.diagnostic()),
            )
            .await?;
            Ok(EventDisposition::InitializeFailed)
        }
    }
}
