//! Tracking label vocabulary.
//!
//! Labels are the human-visible bounty state on an issue. The tracker does
//! not enforce mutual exclusion, so every transition removes the vocabulary
//! labels it supersedes before adding the new one.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BountyLabel {
    /// Request label applied by a human to put a bounty on an issue.
    Bounty,
    Processing,
    Enabled,
    Closing,
    Closed,
    Failed,
    CloseFailed,
    /// Command label: close the bounty regardless of issue state.
    ManualClose,
}

impl BountyLabel {
    pub const ALL: &'static [BountyLabel] = &[
        BountyLabel::Bounty,
        BountyLabel::Processing,
        BountyLabel::Enabled,
        BountyLabel::Closing,
        BountyLabel::Closed,
        BountyLabel::Failed,
        BountyLabel::CloseFailed,
        BountyLabel::ManualClose,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            BountyLabel::Bounty => "bounty",
            BountyLabel::Processing => "bounty:processing",
            BountyLabel::Enabled => "bounty:enabled",
            BountyLabel::Closing => "bounty:closing",
            BountyLabel::Closed => "bounty:closed",
            BountyLabel::Failed => "bounty:failed",
            BountyLabel::CloseFailed => "bounty:close-failed",
            BountyLabel::ManualClose => "bounty:manual-close",
        }
    }

    /// Exact-name lookup. Anything outside the vocabulary is not ours and is
    /// ignored by the router.
    pub fn from_name(name: &str) -> Option<BountyLabel> {
        Self::ALL.iter().copied().find(|label| label.as_str() == name)
    }

    /// Lifecycle labels reflect bounty state; exactly one is expected at
    /// steady state.
    pub const fn is_lifecycle(&self) -> bool {
        !matches!(self, BountyLabel::ManualClose)
    }

    /// Command labels trigger an action and are consumed on receipt.
    pub const fn is_command(&self) -> bool {
        matches!(self, BountyLabel::ManualClose)
    }
}

impl fmt::Display for BountyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters raw tracker label names down to the vocabulary, preserving order.
pub fn vocabulary_labels(names: &[String]) -> Vec<BountyLabel> {
    names.iter().filter_map(|name| BountyLabel::from_name(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for label in BountyLabel::ALL {
            assert_eq!(BountyLabel::from_name(label.as_str()), Some(*label));
        }
        assert_eq!(BountyLabel::from_name("bounty:enabled"), Some(BountyLabel::Enabled));
        assert_eq!(BountyLabel::from_name("bounty:close-failed"), Some(BountyLabel::CloseFailed));
    }

    #[test]
    fn non_vocabulary_names_are_rejected() {
        assert_eq!(BountyLabel::from_name("bug"), None);
        assert_eq!(BountyLabel::from_name("bounty:"), None);
        assert_eq!(BountyLabel::from_name("bounty:enabled "), None);
        assert_eq!(BountyLabel::from_name("Bounty"), None);
    }

    #[test]
    fn manual_close_is_the_only_command() {
        for label in BountyLabel::ALL {
            assert_eq!(label.is_command(), !label.is_lifecycle());
            assert_eq!(label.is_command(), matches!(label, BountyLabel::ManualClose));
        }
    }

    #[test]
    fn vocabulary_filter_keeps_order_and_drops_foreign_names() {
        let names = vec![
            "bug".to_string(),
            "bounty:processing".to_string(),
            "help wanted".to_string(),
            "bounty".to_string(),
        ];
        assert_eq!(vocabulary_labels(&names), vec![BountyLabel::Processing, BountyLabel::Bounty]);
    }
}
