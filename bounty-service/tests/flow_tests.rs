mod harness;

use bounty_core::application::{EventDisposition, EventProcessor};
use bounty_core::domain::model::{BountyScope, IssueRef, IssueSnapshot, RepoLocator, TrackerEvent};
use bounty_core::infrastructure::ledger::InMemoryLedger;
use bounty_core::infrastructure::tracker::InMemoryTracker;
use bounty_service::service::flow::ServiceFlow;
use harness::{FirstWriterWinsLedger, RejectingLedger};
use std::sync::Arc;

const RPC_URL: &str = "http://127.0.0.1:8899";

fn issue_ref(repository_id: u32, issue_number: u32) -> IssueRef {
    IssueRef {
        repo: RepoLocator::new("octo", "demo"),
        scope: BountyScope::new(repository_id.into(), issue_number.into()),
    }
}

fn bounty_labeled(issue: &IssueRef) -> TrackerEvent {
    TrackerEvent::LabelAdded {
        issue: issue.clone(),
        snapshot: IssueSnapshot { labels: vec!["bounty".to_string()], assignee: None },
        label: "bounty".to_string(),
    }
}

#[tokio::test]
async fn rejected_simulation_never_reaches_commit() {
    let tracker = Arc::new(InMemoryTracker::new());
    let ledger = Arc::new(RejectingLedger::new(&["Program log: board authority mismatch"]));
    let flow = ServiceFlow::with_ports(tracker.clone(), ledger.clone(), RPC_URL).unwrap();

    let issue = issue_ref(1296269, 1347);
    let outcome = flow.process(bounty_labeled(&issue)).await.unwrap();

    assert_eq!(outcome, EventDisposition::InitializeFailed);
    assert_eq!(ledger.simulate_calls(), 1);
    assert_eq!(ledger.commit_calls(), 0, "the dry run gates the commit");
    assert_eq!(tracker.labels(issue.scope), vec!["bounty:failed".to_string()]);
    let comments = tracker.comments(issue.scope);
    assert_eq!(comments.len(), 1);
    assert!(comments[0].contains("board authority mismatch"));

    let snapshot = flow.metrics().snapshot();
    assert_eq!(snapshot.flows_settled, 1);
    assert_eq!(snapshot.ledger_commits_ok, 0);
    assert_eq!(snapshot.ledger_commits_failed, 0);
}

#[tokio::test]
async fn concurrent_initializes_resolve_to_one_winner() {
    let tracker = Arc::new(InMemoryTracker::new());
    let ledger = Arc::new(FirstWriterWinsLedger::new());
    let flow = ServiceFlow::with_ports(tracker.clone(), ledger.clone(), RPC_URL).unwrap();

    let issue = issue_ref(42, 7);
    let first = flow.process(bounty_labeled(&issue));
    let second = flow.process(bounty_labeled(&issue));
    let (first, second) = tokio::join!(first, second);

    let mut outcomes = vec![first.unwrap(), second.unwrap()];
    outcomes.sort_by_key(|outcome| outcome.as_str());
    assert_eq!(
        outcomes,
        vec![EventDisposition::InitializeFailed, EventDisposition::Initialized],
        "the ledger serializes the race: exactly one side wins"
    );
    assert_eq!(ledger.commit_attempts(), 2);

    let comments = tracker.comments(issue.scope);
    let enabled_notices = comments.iter().filter(|body| body.contains("Bounty Enabled")).count();
    assert_eq!(enabled_notices, 1, "only the winning commit announces the bounty");

    let snapshot = flow.metrics().snapshot();
    assert_eq!(snapshot.ledger_commits_ok, 1);
    assert_eq!(snapshot.ledger_commits_failed, 1);
}

#[tokio::test]
async fn round_trip_is_visible_in_the_metrics() {
    let tracker = Arc::new(InMemoryTracker::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let flow = ServiceFlow::with_ports(tracker.clone(), ledger.clone(), RPC_URL).unwrap();

    let issue = issue_ref(10, 20);
    let outcome = flow.process(bounty_labeled(&issue)).await.unwrap();
    assert_eq!(outcome, EventDisposition::Initialized);

    let outcome = flow
        .process(TrackerEvent::IssueClosed {
            issue: issue.clone(),
            snapshot: IssueSnapshot {
                labels: vec!["bounty:enabled".to_string()],
                assignee: Some("octocat".to_string()),
            },
        })
        .await
        .unwrap();
    assert_eq!(outcome, EventDisposition::Closed);

    let snapshot = flow.metrics().snapshot();
    assert_eq!(snapshot.flows_settled, 2);
    assert_eq!(snapshot.flows_failed, 0);
    assert_eq!(snapshot.ledger_commits_ok, 2);
    assert_eq!(snapshot.ledger_commits_failed, 0);

    let exposition = flow.metrics().encode().unwrap();
    assert!(exposition.contains("reconcile_flows_total"));
    assert!(exposition.contains("tracker_calls_total"));
}
