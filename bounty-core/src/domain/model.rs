use crate::foundation::{IssueNumber, RepositoryId};
use std::fmt;

/// Identifies one bounty: the pair every ledger address derives from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BountyScope {
    pub repository: RepositoryId,
    pub issue: IssueNumber,
}

impl BountyScope {
    pub const fn new(repository: RepositoryId, issue: IssueNumber) -> Self {
        Self { repository, issue }
    }
}

impl fmt::Display for BountyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository, self.issue)
    }
}

/// Tracker-facing location of a repository, as REST path segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub name: String,
}

impl RepoLocator {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self { owner: owner.into(), name: name.into() }
    }

    /// Splits the tracker's `owner/name` form. `None` when either side is
    /// empty or the separator is missing.
    pub fn from_full_name(full_name: &str) -> Option<RepoLocator> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(RepoLocator::new(owner, name))
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything needed to address one issue on both sides: tracker path and
/// ledger scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueRef {
    pub repo: RepoLocator,
    pub scope: BountyScope,
}

/// Issue state carried by the event payload at delivery time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueSnapshot {
    /// Raw label names currently attached, vocabulary and foreign alike.
    pub labels: Vec<String>,
    pub assignee: Option<String>,
}

/// Inbound tracker events, already reduced to the four kinds the router
/// dispatches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerEvent {
    LabelAdded { issue: IssueRef, snapshot: IssueSnapshot, label: String },
    LabelRemoved { issue: IssueRef, label: String },
    IssueClosed { issue: IssueRef, snapshot: IssueSnapshot },
    CommentCreated { issue: IssueRef, author: String, body: String },
}

impl TrackerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            TrackerEvent::LabelAdded { .. } => "label_added",
            TrackerEvent::LabelRemoved { .. } => "label_removed",
            TrackerEvent::IssueClosed { .. } => "issue_closed",
            TrackerEvent::CommentCreated { .. } => "comment_created",
        }
    }

    pub fn issue(&self) -> &IssueRef {
        match self {
            TrackerEvent::LabelAdded { issue, .. } => issue,
            TrackerEvent::LabelRemoved { issue, .. } => issue,
            TrackerEvent::IssueClosed { issue, .. } => issue,
            TrackerEvent::CommentCreated { issue, .. } => issue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_locator_parses_full_name() {
        let repo = RepoLocator::from_full_name("octocat/hello-world").expect("locator");
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.to_string(), "octocat/hello-world");
    }

    #[test]
    fn repo_locator_rejects_malformed_names() {
        assert_eq!(RepoLocator::from_full_name("no-separator"), None);
        assert_eq!(RepoLocator::from_full_name("/dangling"), None);
        assert_eq!(RepoLocator::from_full_name("dangling/"), None);
    }

    #[test]
    fn scope_display_is_repo_and_issue() {
        let scope = BountyScope::new(42.into(), 7.into());
        assert_eq!(scope.to_string(), "42#7");
    }
}
