//! Comment commands.
//!
//! The transfer command is parsed and gated on authorship, but its effect
//! stops at recognition. Execution needs payout semantics the ledger
//! program does not expose yet.

use crate::application::event_processor::EventDisposition;
use crate::domain::command::{parse_command, IssueCommand};
use crate::domain::model::IssueRef;
use crate::foundation::Result;
use log::{debug, info};

pub(crate) async fn comment_created(
    issue: &IssueRef,
    author: &str,
    body: &str,
) -> Result<EventDisposition> {
    let Some(command) = parse_command(body) else {
        return Ok(EventDisposition::Ignored);
    };

    // Only the repository owner may direct a transfer.
    if author != issue.repo.owner {
        debug!("command from non-owner ignored issue={} author={}", issue.scope, author);
        return Ok(EventDisposition::Ignored);
    }

    match command {
        IssueCommand::Transfer { recipient } => {
            info!("transfer command recognized issue={} recipient={}", issue.scope, recipient);
            Ok(EventDisposition::CommandRecognized)
        }
    }
}
