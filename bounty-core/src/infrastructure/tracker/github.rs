//! GitHub REST client for issue label and comment mutations.

use crate::domain::model::IssueRef;
use crate::foundation::{BountyError, Result, TRACKER_API_VERSION};
use crate::infrastructure::config::TrackerConfig;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

use super::IssueTracker;

pub struct GitHubTracker {
    client: Client,
    base: Url,
}

impl GitHubTracker {
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base)
            .map_err(|err| BountyError::ConfigError(format!("invalid tracker api base: {}", err)))?;
        if base.cannot_be_a_base() {
            return Err(BountyError::ConfigError(format!(
                "tracker api base is not an http url: {}",
                config.api_base
            )));
        }

        let mut headers = HeaderMap::new();
        let token = config.api_token();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|err| BountyError::ConfigError(format!("invalid tracker api token: {}", err)))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(TRACKER_API_VERSION),
        );
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|err| BountyError::ConfigError(format!("invalid tracker user agent: {}", err)))?;
        headers.insert(USER_AGENT, user_agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, base })
    }

    fn issue_url(&self, issue: &IssueRef, suffix: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        let number = issue.scope.issue.to_string();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| BountyError::ConfigError("tracker api base rejects path segments".to_string()))?;
            segments.pop_if_empty();
            segments.extend(["repos", issue.repo.owner.as_str(), issue.repo.name.as_str(), "issues"]);
            segments.push(&number);
            segments.extend(suffix.iter().copied());
        }
        Ok(url)
    }
}

async fn reject_failure(operation: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let details = response.text().await.unwrap_or_default();
    Err(BountyError::tracker_api(operation, status.as_u16(), details))
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn add_label(&self, issue: &IssueRef, label: &str) -> Result<()> {
        let url = self.issue_url(issue, &["labels"])?;
        debug!("tracker add_label issue={} label={}", issue.scope, label);
        let response =
            self.client.post(url).json(&serde_json::json!({ "labels": [label] })).send().await?;
        reject_failure("add_label", response).await?;
        Ok(())
    }

    async fn remove_label(&self, issue: &IssueRef, label: &str) -> Result<()> {
        let url = self.issue_url(issue, &["labels", label])?;
        debug!("tracker remove_label issue={} label={}", issue.scope, label);
        let response = self.client.delete(url).send().await?;
        // GitHub answers 404 both for unknown labels and labels the issue
        // does not carry. The engine strips labels speculatively, so
        // treat that as already removed.
        if response.status() == StatusCode::NOT_FOUND {
            debug!("tracker remove_label already absent issue={} label={}", issue.scope, label);
            return Ok(());
        }
        reject_failure("remove_label", response).await?;
        Ok(())
    }

    async fn create_comment(&self, issue: &IssueRef, body: &str) -> Result<()> {
        let url = self.issue_url(issue, &["comments"])?;
        debug!("tracker create_comment issue={} bytes={}", issue.scope, body.len());
        let response = self.client.post(url).json(&serde_json::json!({ "body": body })).send().await?;
        reject_failure("create_comment", response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BountyScope, RepoLocator};

    fn tracker() -> GitHubTracker {
        let config = TrackerConfig {
            api_base: "https://api.github.com".to_string(),
            api_token: "token".to_string(),
            user_agent: "solana-bounty-service".to_string(),
            webhook_secret: "secret".to_string(),
            timeout_secs: 5,
        };
        GitHubTracker::new(&config).expect("tracker")
    }

    fn issue() -> IssueRef {
        IssueRef {
            repo: RepoLocator { owner: "solana-foundation".to_string(), name: "bounties".to_string() },
            scope: BountyScope::new(1296269.into(), 1347.into()),
        }
    }

    #[test]
    fn issue_urls_compose_under_the_base() {
        let tracker = tracker();
        let issue = issue();

        let labels = tracker.issue_url(&issue, &["labels"]).expect("url");
        assert_eq!(labels.as_str(), "https://api.github.com/repos/solana-foundation/bounties/issues/1347/labels");

        let comments = tracker.issue_url(&issue, &["comments"]).expect("url");
        assert_eq!(
            comments.as_str(),
            "https://api.github.com/repos/solana-foundation/bounties/issues/1347/comments"
        );
    }

    #[test]
    fn label_segments_keep_the_colon() {
        let tracker = tracker();
        let url = tracker.issue_url(&issue(), &["labels", "bounty:enabled"]).expect("url");
        assert!(url.as_str().ends_with("/labels/bounty:enabled"));
    }

    #[test]
    fn rejects_a_base_without_a_path() {
        let config = TrackerConfig {
            api_base: "mailto:root@localhost".to_string(),
            api_token: "token".to_string(),
            user_agent: "solana-bounty-service".to_string(),
            webhook_secret: "secret".to_string(),
            timeout_secs: 5,
        };
        assert!(GitHubTracker::new(&config).is_err());
    }
}
