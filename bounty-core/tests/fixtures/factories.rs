use bounty_core::domain::model::{BountyScope, IssueRef, IssueSnapshot, RepoLocator};

pub const OWNER: &str = "octo";
pub const REPO: &str = "demo";

pub fn issue_ref(repository_id: u32, issue_number: u32) -> IssueRef {
    IssueRef {
        repo: RepoLocator { owner: OWNER.to_string(), name: REPO.to_string() },
        scope: BountyScope::new(repository_id.into(), issue_number.into()),
    }
}

pub fn snapshot(labels: &[&str]) -> IssueSnapshot {
    IssueSnapshot { labels: labels.iter().map(|name| name.to_string()).collect(), assignee: None }
}

pub fn snapshot_with_assignee(labels: &[&str], assignee: &str) -> IssueSnapshot {
    IssueSnapshot {
        labels: labels.iter().map(|name| name.to_string()).collect(),
        assignee: Some(assignee.to_string()),
    }
}
