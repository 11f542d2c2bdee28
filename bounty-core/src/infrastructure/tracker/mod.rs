//! Issue tracker access.
//!
//! The engine only ever touches three tracker surfaces: adding a label,
//! removing a label, and posting a comment. [`IssueTracker`] narrows the
//! tracker to exactly those calls so flows stay testable against the
//! in-memory recorder below.

use crate::domain::model::{BountyScope, IssueRef};
use crate::foundation::Result;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

pub mod github;

pub use github::GitHubTracker;

/// One mutation issued against the tracker, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerAction {
    AddLabel { scope: BountyScope, label: String },
    RemoveLabel { scope: BountyScope, label: String },
    CreateComment { scope: BountyScope, body: String },
}

#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn add_label(&self, issue: &IssueRef, label: &str) -> Result<()>;

    /// Removing a label the issue does not carry is not an error.
    async fn remove_label(&self, issue: &IssueRef, label: &str) -> Result<()>;

    async fn create_comment(&self, issue: &IssueRef, body: &str) -> Result<()>;
}

/// Recording tracker for tests. Keeps the label set per issue plus the
/// full ordered action log.
#[derive(Default)]
pub struct InMemoryTracker {
    labels: Mutex<HashMap<BountyScope, BTreeSet<String>>>,
    comments: Mutex<HashMap<BountyScope, Vec<String>>>,
    actions: Mutex<Vec<TrackerAction>>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self, scope: BountyScope) -> Vec<String> {
        self.labels
            .lock()
            .map(|map| map.get(&scope).map(|set| set.iter().cloned().collect()).unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn comments(&self, scope: BountyScope) -> Vec<String> {
        self.comments
            .lock()
            .map(|map| map.get(&scope).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn actions(&self) -> Vec<TrackerAction> {
        self.actions.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn record(&self, action: TrackerAction) {
        if let Ok(mut log) = self.actions.lock() {
            log.push(action);
        }
    }
}

#[async_trait]
impl IssueTracker for InMemoryTracker {
    async fn add_label(&self, issue: &IssueRef, label: &str) -> Result<()> {
        if let Ok(mut map) = self.labels.lock() {
            map.entry(issue.scope).or_default().insert(label.to_string());
        }
        self.record(TrackerAction::AddLabel { scope: issue.scope, label: label.to_string() });
        Ok(())
    }

    async fn remove_label(&self, issue: &IssueRef, label: &str) -> Result<()> {
        if let Ok(mut map) = self.labels.lock() {
            if let Some(set) = map.get_mut(&issue.scope) {
                set.remove(label);
            }
        }
        self.record(TrackerAction::RemoveLabel { scope: issue.scope, label: label.to_string() });
        Ok(())
    }

    async fn create_comment(&self, issue: &IssueRef, body: &str) -> Result<()> {
        if let Ok(mut map) = self.comments.lock() {
            map.entry(issue.scope).or_default().push(body.to_string());
        }
        self.record(TrackerAction::CreateComment { scope: issue.scope, body: body.to_string() });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RepoLocator;

    fn issue() -> IssueRef {
        IssueRef {
            repo: RepoLocator { owner: "octo".to_string(), name: "demo".to_string() },
            scope: BountyScope::new(1.into(), 2.into()),
        }
    }

    #[tokio::test]
    async fn records_mutations_in_order() {
        let tracker = InMemoryTracker::new();
        let issue = issue();

        tracker.add_label(&issue, "bounty:processing").await.unwrap();
        tracker.remove_label(&issue, "bounty:processing").await.unwrap();
        tracker.add_label(&issue, "bounty:enabled").await.unwrap();
        tracker.create_comment(&issue, "done").await.unwrap();

        assert_eq!(tracker.labels(issue.scope), vec!["bounty:enabled".to_string()]);
        assert_eq!(tracker.comments(issue.scope), vec!["done".to_string()]);
        assert_eq!(tracker.actions().len(), 4);
    }

    #[tokio::test]
    async fn removing_an_absent_label_is_quiet() {
        let tracker = InMemoryTracker::new();
        let issue = issue();

        tracker.remove_label(&issue, "bounty:failed").await.unwrap();

        assert!(tracker.labels(issue.scope).is_empty());
    }
}
