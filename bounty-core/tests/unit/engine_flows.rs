use bounty_core::application::{process_tracker_event, EventDisposition, ReconcileContext};
use bounty_core::domain::label::BountyLabel;
use bounty_core::domain::model::{BountyScope, TrackerEvent};
use bounty_core::domain::record::BountyRecord;
use bounty_core::infrastructure::ledger::InMemoryLedger;
use bounty_core::infrastructure::tracker::{InMemoryTracker, IssueTracker};
use std::sync::Arc;

use crate::fixtures::{issue_ref, snapshot, snapshot_with_assignee};

const RPC_URL: &str = "http://127.0.0.1:8899";

fn harness() -> (Arc<InMemoryTracker>, Arc<InMemoryLedger>, ReconcileContext) {
    let tracker = Arc::new(InMemoryTracker::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let context = ReconcileContext::new(tracker.clone(), ledger.clone(), RPC_URL);
    (tracker, ledger, context)
}

fn lifecycle_labels(tracker: &InMemoryTracker, scope: BountyScope) -> Vec<String> {
    tracker
        .labels(scope)
        .into_iter()
        .filter(|name| BountyLabel::from_name(name).map(|label| label.is_lifecycle()).unwrap_or(false))
        .collect()
}

#[tokio::test]
async fn full_lifecycle_round_trip_posts_exactly_two_comments() {
    let (tracker, ledger, context) = harness();
    let issue = issue_ref(1296269, 1347);
    let scope = issue.scope;

    let outcome = process_tracker_event(
        &context,
        TrackerEvent::LabelAdded {
            issue: issue.clone(),
            snapshot: snapshot(&["bounty"]),
            label: "bounty".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome, EventDisposition::Initialized);
    assert_eq!(lifecycle_labels(&tracker, scope), vec!["bounty:enabled".to_string()]);
    let comments = tracker.comments(scope);
    assert_eq!(comments.len(), 1);
    assert!(comments[0].contains("Bounty Enabled"));
    assert!(comments[0].contains("explorer.solana.com"));

    let outcome = process_tracker_event(
        &context,
        TrackerEvent::IssueClosed {
            issue: issue.clone(),
            snapshot: snapshot_with_assignee(&["bounty:enabled"], "octocat"),
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome, EventDisposition::Closed);
    assert_eq!(lifecycle_labels(&tracker, scope), vec!["bounty:closed".to_string()]);
    let comments = tracker.comments(scope);
    assert_eq!(comments.len(), 2, "round trip posts the enabled and closed notices, never more");
    assert!(comments[1].contains("Bounty Closed"));
    assert!(comments[1].contains("@octocat"));

    let record = ledger.record(scope).expect("record");
    assert!(record.is_closed);
    assert_eq!(record.bounty_hunter.as_deref(), Some("octocat"));
}

#[tokio::test]
async fn relabeling_an_enabled_bounty_resyncs_without_comment() {
    let (tracker, ledger, context) = harness();
    let issue = issue_ref(10, 20);
    let scope = issue.scope;

    process_tracker_event(
        &context,
        TrackerEvent::LabelAdded {
            issue: issue.clone(),
            snapshot: snapshot(&["bounty"]),
            label: "bounty".to_string(),
        },
    )
    .await
    .unwrap();
    let record_before = ledger.record(scope).expect("record");

    let outcome = process_tracker_event(
        &context,
        TrackerEvent::LabelAdded {
            issue: issue.clone(),
            snapshot: snapshot(&["bounty:enabled", "bounty"]),
            label: "bounty".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome, EventDisposition::Resynced);
    assert_eq!(tracker.labels(scope), vec!["bounty:enabled".to_string()]);
    assert_eq!(tracker.comments(scope).len(), 1, "resync stays silent");
    assert_eq!(ledger.record(scope).expect("record"), record_before, "resync never writes");
}

#[tokio::test]
async fn resync_reflects_an_already_closed_record() {
    let issue = issue_ref(3, 9);
    let scope = issue.scope;
    let mut record = BountyRecord::open(scope, [1u8; 32], [2u8; 32]);
    record.close(Some("octocat".to_string()), 1_700_000_000);

    let tracker = Arc::new(InMemoryTracker::new());
    let ledger = Arc::new(InMemoryLedger::with_records(vec![(scope, record)]));
    let context = ReconcileContext::new(tracker.clone(), ledger.clone(), RPC_URL);

    let outcome = process_tracker_event(
        &context,
        TrackerEvent::LabelAdded {
            issue: issue.clone(),
            snapshot: snapshot(&["bounty"]),
            label: "bounty".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome, EventDisposition::Resynced);
    assert_eq!(tracker.labels(scope), vec!["bounty:closed".to_string()]);
    assert!(tracker.comments(scope).is_empty());
}

#[tokio::test]
async fn closing_an_uninitialized_bounty_fails_without_a_write() {
    let (tracker, ledger, context) = harness();
    let issue = issue_ref(42, 7);
    let scope = issue.scope;

    let outcome = process_tracker_event(
        &context,
        TrackerEvent::LabelAdded {
            issue: issue.clone(),
            snapshot: snapshot(&["bounty:manual-close"]),
            label: "bounty:manual-close".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome, EventDisposition::CloseFailed);
    assert_eq!(tracker.labels(scope), vec!["bounty:close-failed".to_string()]);
    let comments = tracker.comments(scope);
    assert_eq!(comments.len(), 1);
    assert!(comments[0].contains("not initialized"));
    assert!(ledger.record(scope).is_none(), "nothing may be created by a close");
}

#[tokio::test]
async fn stale_vocabulary_labels_are_cleared_before_the_new_state_lands() {
    let (tracker, _ledger, context) = harness();
    let issue = issue_ref(5, 6);
    let scope = issue.scope;

    // A previous failed attempt left its label behind.
    tracker.add_label(&issue, "bounty:failed").await.unwrap();

    let outcome = process_tracker_event(
        &context,
        TrackerEvent::LabelAdded {
            issue: issue.clone(),
            snapshot: snapshot(&["bounty:failed", "bug", "bounty"]),
            label: "bounty".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(outcome, EventDisposition::Initialized);
    assert_eq!(lifecycle_labels(&tracker, scope), vec!["bounty:enabled".to_string()]);
}

#[tokio::test]
async fn router_ignores_foreign_labels_removals_and_unlabeled_closes() {
    let (tracker, _ledger, context) = harness();
    let issue = issue_ref(8, 8);
    let scope = issue.scope;

    let added = process_tracker_event(
        &context,
        TrackerEvent::LabelAdded {
            issue: issue.clone(),
            snapshot: snapshot(&["bug"]),
            label: "bug".to_string(),
        },
    )
    .await
    .unwrap();
    let removed = process_tracker_event(
        &context,
        TrackerEvent::LabelRemoved { issue: issue.clone(), label: "bounty".to_string() },
    )
    .await
    .unwrap();
    let closed = process_tracker_event(
        &context,
        TrackerEvent::IssueClosed { issue: issue.clone(), snapshot: snapshot(&["bug"]) },
    )
    .await
    .unwrap();

    assert_eq!(added, EventDisposition::Ignored);
    assert_eq!(removed, EventDisposition::Ignored);
    assert_eq!(closed, EventDisposition::Ignored);
    assert!(tracker.actions().is_empty(), "ignored events must not touch the tracker");
}

#[tokio::test]
async fn owner_transfer_command_is_recognized_but_not_acted_on() {
    let (tracker, ledger, context) = harness();
    let issue = issue_ref(11, 12);

    let from_owner = process_tracker_event(
        &context,
        TrackerEvent::CommentCreated {
            issue: issue.clone(),
            author: "octo".to_string(),
            body: "send bounty: @hunter".to_string(),
        },
    )
    .await
    .unwrap();
    let from_stranger = process_tracker_event(
        &context,
        TrackerEvent::CommentCreated {
            issue: issue.clone(),
            author: "drive-by".to_string(),
            body: "send bounty: @hunter".to_string(),
        },
    )
    .await
    .unwrap();
    let plain_chatter = process_tracker_event(
        &context,
        TrackerEvent::CommentCreated {
            issue: issue.clone(),
            author: "octo".to_string(),
            body: "deploy at 12:30".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(from_owner, EventDisposition::CommandRecognized);
    assert_eq!(from_stranger, EventDisposition::Ignored);
    assert_eq!(plain_chatter, EventDisposition::Ignored);
    assert!(tracker.actions().is_empty());
    assert!(ledger.record(issue.scope).is_none());
}
