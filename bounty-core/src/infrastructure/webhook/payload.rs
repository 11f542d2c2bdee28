//! Webhook payload decoding.
//!
//! GitHub names the payload shape in the `X-GitHub-Event` header. Only
//! `issues` and `issue_comment` deliveries can carry work for the engine;
//! everything else decodes to no event at all rather than an error, so
//! unrelated repository traffic never trips the failure path.

use crate::domain::model::{BountyScope, IssueRef, IssueSnapshot, RepoLocator, TrackerEvent};
use crate::foundation::{BountyError, Result};
use serde::Deserialize;

pub const EVENT_ISSUES: &str = "issues";
pub const EVENT_ISSUE_COMMENT: &str = "issue_comment";

#[derive(Debug, Deserialize)]
pub struct WebhookRepository {
    pub id: u32,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookLabel {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookIssue {
    pub number: u32,
    #[serde(default)]
    pub labels: Vec<WebhookLabel>,
    #[serde(default)]
    pub assignee: Option<WebhookUser>,
}

#[derive(Debug, Deserialize)]
pub struct IssuesPayload {
    pub action: String,
    pub issue: WebhookIssue,
    pub repository: WebhookRepository,
    #[serde(default)]
    pub label: Option<WebhookLabel>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookComment {
    pub body: String,
    pub user: WebhookUser,
}

#[derive(Debug, Deserialize)]
pub struct IssueCommentPayload {
    pub action: String,
    pub issue: WebhookIssue,
    pub comment: WebhookComment,
    pub repository: WebhookRepository,
}

fn issue_ref(repository: &WebhookRepository, issue: &WebhookIssue) -> Result<IssueRef> {
    let repo = RepoLocator::from_full_name(&repository.full_name).ok_or_else(|| {
        BountyError::invalid_payload(format!("malformed repository name: {}", repository.full_name))
    })?;
    let scope = BountyScope::new(repository.id.into(), issue.number.into());
    Ok(IssueRef { repo, scope })
}

fn snapshot(issue: WebhookIssue) -> IssueSnapshot {
    IssueSnapshot {
        labels: issue.labels.into_iter().map(|label| label.name).collect(),
        assignee: issue.assignee.map(|user| user.login),
    }
}

impl IssuesPayload {
    pub fn into_event(self) -> Result<Option<TrackerEvent>> {
        let issue = issue_ref(&self.repository, &self.issue)?;
        match self.action.as_str() {
            "labeled" => {
                let label = self
                    .label
                    .ok_or_else(|| BountyError::invalid_payload("labeled event carries no label"))?;
                Ok(Some(TrackerEvent::LabelAdded {
                    issue,
                    snapshot: snapshot(self.issue),
                    label: label.name,
                }))
            }
            "unlabeled" => {
                let label = self
                    .label
                    .ok_or_else(|| BountyError::invalid_payload("unlabeled event carries no label"))?;
                Ok(Some(TrackerEvent::LabelRemoved { issue, label: label.name }))
            }
            "closed" => Ok(Some(TrackerEvent::IssueClosed { issue, snapshot: snapshot(self.issue) })),
            _ => Ok(None),
        }
    }
}

impl IssueCommentPayload {
    pub fn into_event(self) -> Result<Option<TrackerEvent>> {
        if self.action != "created" {
            return Ok(None);
        }
        let issue = issue_ref(&self.repository, &self.issue)?;
        Ok(Some(TrackerEvent::CommentCreated {
            issue,
            author: self.comment.user.login,
            body: self.comment.body,
        }))
    }
}

/// Decode one delivery into at most one engine event.
pub fn parse_event(event_kind: &str, body: &[u8]) -> Result<Option<TrackerEvent>> {
    match event_kind {
        EVENT_ISSUES => {
            let payload: IssuesPayload = serde_json::from_slice(body)
                .map_err(|err| BountyError::invalid_payload(format!("issues payload: {}", err)))?;
            payload.into_event()
        }
        EVENT_ISSUE_COMMENT => {
            let payload: IssueCommentPayload = serde_json::from_slice(body)
                .map_err(|err| BountyError::invalid_payload(format!("issue_comment payload: {}", err)))?;
            payload.into_event()
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled_body(label: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "action": "labeled",
            "label": { "name": label },
            "issue": {
                "number": 1347,
                "labels": [{ "name": "bug" }, { "name": label }],
            },
            "repository": { "id": 1296269, "full_name": "octo/demo" },
        }))
        .unwrap()
    }

    #[test]
    fn labeled_becomes_label_added() {
        let event = parse_event(EVENT_ISSUES, &labeled_body("bounty")).unwrap().unwrap();
        match event {
            TrackerEvent::LabelAdded { issue, snapshot, label } => {
                assert_eq!(issue.repo.owner, "octo");
                assert_eq!(issue.scope.repository.value(), 1296269);
                assert_eq!(issue.scope.issue.value(), 1347);
                assert_eq!(label, "bounty");
                assert_eq!(snapshot.labels, vec!["bug".to_string(), "bounty".to_string()]);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn closed_keeps_the_assignee() {
        let body = serde_json::to_vec(&serde_json::json!({
            "action": "closed",
            "issue": {
                "number": 7,
                "labels": [{ "name": "bounty:enabled" }],
                "assignee": { "login": "octocat" },
            },
            "repository": { "id": 42, "full_name": "octo/demo" },
        }))
        .unwrap();

        let event = parse_event(EVENT_ISSUES, &body).unwrap().unwrap();
        match event {
            TrackerEvent::IssueClosed { snapshot, .. } => {
                assert_eq!(snapshot.assignee.as_deref(), Some("octocat"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn comment_created_becomes_comment_event() {
        let body = serde_json::to_vec(&serde_json::json!({
            "action": "created",
            "comment": { "body": "send bounty: @octocat", "user": { "login": "maintainer" } },
            "issue": { "number": 9, "labels": [] },
            "repository": { "id": 5, "full_name": "octo/demo" },
        }))
        .unwrap();

        let event = parse_event(EVENT_ISSUE_COMMENT, &body).unwrap().unwrap();
        match event {
            TrackerEvent::CommentCreated { author, body, .. } => {
                assert_eq!(author, "maintainer");
                assert_eq!(body, "send bounty: @octocat");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn unrelated_actions_decode_to_nothing() {
        let body = serde_json::to_vec(&serde_json::json!({
            "action": "opened",
            "issue": { "number": 1, "labels": [] },
            "repository": { "id": 1, "full_name": "octo/demo" },
        }))
        .unwrap();

        assert!(parse_event(EVENT_ISSUES, &body).unwrap().is_none());
        assert!(parse_event("ping", b"{}").unwrap().is_none());
        assert!(parse_event("push", b"{}").unwrap().is_none());
    }

    #[test]
    fn labeled_without_a_label_is_rejected() {
        let body = serde_json::to_vec(&serde_json::json!({
            "action": "labeled",
            "issue": { "number": 1, "labels": [] },
            "repository": { "id": 1, "full_name": "octo/demo" },
        }))
        .unwrap();

        assert!(parse_event(EVENT_ISSUES, &body).is_err());
    }

    #[test]
    fn malformed_repository_names_are_rejected() {
        let body = serde_json::to_vec(&serde_json::json!({
            "action": "closed",
            "issue": { "number": 1, "labels": [] },
            "repository": { "id": 1, "full_name": "no-slash-here" },
        }))
        .unwrap();

        assert!(parse_event(EVENT_ISSUES, &body).is_err());
    }

    #[test]
    fn garbage_bodies_are_rejected() {
        assert!(parse_event(EVENT_ISSUES, b"not json").is_err());
    }
}
