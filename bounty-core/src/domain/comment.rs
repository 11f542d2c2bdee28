//! Notification comment bodies.
//!
//! Comments are write-once per transition and never edited or deleted.
//! Failure bodies carry the program diagnostic verbatim in a code block;
//! success bodies carry an explorer link for the committed transaction.

use crate::foundation::EXPLORER_BASE_URL;
use url::Url;

/// Diagnostic posted when a close is requested for a scope the ledger has
/// no record of.
pub const NOT_INITIALIZED_MESSAGE: &str = "bounty is not initialized";

/// Builds the explorer inspection link for a committed transaction,
/// pointing the explorer at the cluster the commit actually ran against.
pub fn explorer_url(signature: &str, rpc_endpoint: &str) -> String {
    match Url::parse(&format!("{}/{}", EXPLORER_BASE_URL, signature)) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("cluster", "custom").append_pair("customUrl", rpc_endpoint);
            url.to_string()
        }
        // The base is a constant, so this only fires for a signature that
        // breaks URL syntax; the bare form is still more useful than nothing.
        Err(_) => format!("{}/{}", EXPLORER_BASE_URL, signature),
    }
}

pub fn bounty_enabled_body(explorer_url: &str) -> String {
    format!(
        "# 💰 Bounty Enabled\n\nA bounty is now live for this issue.\n\n[Inspect the transaction]({})",
        explorer_url
    )
}

pub fn bounty_closed_body(explorer_url: &str, bounty_hunter: Option<&str>) -> String {
    match bounty_hunter {
        Some(hunter) => format!(
            "# 🎉 Bounty Closed\n\nThe bounty was paid out to @{}.\n\n[Inspect the transaction]({})",
            hunter, explorer_url
        ),
        None => format!(
            "# 🎉 Bounty Closed\n\nThe bounty was closed without an assignee.\n\n[Inspect the transaction]({})",
            explorer_url
        ),
    }
}

pub fn bounty_failed_body(diagnostic: &str) -> String {
    error_body("# ⚠️ Bounty Failed", diagnostic)
}

pub fn close_failed_body(diagnostic: &str) -> String {
    error_body("# ⚠️ Failed to close bounty", diagnostic)
}

fn error_body(title: &str, diagnostic: &str) -> String {
    if diagnostic.is_empty() {
        return title.to_string();
    }
    format!("{}\n\n```\n{}\n```", title, diagnostic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_url_points_at_the_custom_cluster() {
        let url = explorer_url("5sig", "http://127.0.0.1:8899");
        assert_eq!(
            url,
            "https://explorer.solana.com/tx/5sig?cluster=custom&customUrl=http%3A%2F%2F127.0.0.1%3A8899"
        );
    }

    #[test]
    fn enabled_body_links_the_transaction() {
        let body = bounty_enabled_body("https://example.test/tx/abc");
        assert!(body.starts_with("# 💰 Bounty Enabled"));
        assert!(body.contains("(https://example.test/tx/abc)"));
    }

    #[test]
    fn closed_body_credits_the_hunter_when_assigned() {
        let with_hunter = bounty_closed_body("https://example.test/tx/abc", Some("octocat"));
        assert!(with_hunter.contains("@octocat"));
        let without = bounty_closed_body("https://example.test/tx/abc", None);
        assert!(without.contains("without an assignee"));
        assert!(!without.contains('@'));
    }

    #[test]
    fn failure_bodies_fence_the_diagnostic() {
        let body = bounty_failed_body("Program log: already in use");
        assert!(body.starts_with("# ⚠️ Bounty Failed"));
        assert!(body.contains("```\nProgram log: already in use\n```"));

        let close = close_failed_body(NOT_INITIALIZED_MESSAGE);
        assert!(close.starts_with("# ⚠️ Failed to close bounty"));
        assert!(close.contains("not initialized"));
    }

    #[test]
    fn empty_diagnostic_leaves_the_title_alone() {
        assert_eq!(bounty_failed_body(""), "# ⚠️ Bounty Failed");
    }
}
