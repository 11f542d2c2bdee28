//! Bounty lifecycle state machine.
//!
//! One state per scope, reflected on the issue as exactly one lifecycle
//! label. `Closed`, `Failed` and `CloseFailed` are terminal for an attempt
//! but re-triggerable: re-applying `bounty` or `bounty:manual-close` starts
//! the corresponding sub-machine again.

use crate::domain::label::BountyLabel;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BountyState {
    Requested,
    Processing,
    Enabled,
    Closing,
    Closed,
    Failed,
    CloseFailed,
}

const VALID_TRANSITIONS: &[(BountyState, BountyState)] = &[
    (BountyState::Requested, BountyState::Processing),
    // Resync onto a record that already exists on the ledger.
    (BountyState::Requested, BountyState::Enabled),
    (BountyState::Requested, BountyState::Closed),
    (BountyState::Processing, BountyState::Enabled),
    (BountyState::Processing, BountyState::Failed),
    (BountyState::Enabled, BountyState::Closing),
    // Close requested after the record already settled closed.
    (BountyState::Enabled, BountyState::Closed),
    (BountyState::Enabled, BountyState::CloseFailed),
    (BountyState::Closing, BountyState::Closed),
    (BountyState::Closing, BountyState::CloseFailed),
];

#[derive(Clone, Debug)]
pub struct TransitionCheck {
    pub valid: bool,
    pub from_state: String,
    pub to_state: String,
}

pub fn validate_transition(from: BountyState, to: BountyState) -> TransitionCheck {
    let valid = from == to || VALID_TRANSITIONS.contains(&(from, to));
    TransitionCheck { valid, from_state: format!("{:?}", from), to_state: format!("{:?}", to) }
}

pub fn is_terminal(state: BountyState) -> bool {
    matches!(state, BountyState::Closed | BountyState::Failed | BountyState::CloseFailed)
}

impl BountyState {
    /// The lifecycle label reflecting this state on the issue.
    pub const fn label(&self) -> BountyLabel {
        match self {
            BountyState::Requested => BountyLabel::Bounty,
            BountyState::Processing => BountyLabel::Processing,
            BountyState::Enabled => BountyLabel::Enabled,
            BountyState::Closing => BountyLabel::Closing,
            BountyState::Closed => BountyLabel::Closed,
            BountyState::Failed => BountyLabel::Failed,
            BountyState::CloseFailed => BountyLabel::CloseFailed,
        }
    }

    /// Inverse of [`BountyState::label`]. `None` for the command label,
    /// which carries no state.
    pub fn from_label(label: BountyLabel) -> Option<BountyState> {
        match label {
            BountyLabel::Bounty => Some(BountyState::Requested),
            BountyLabel::Processing => Some(BountyState::Processing),
            BountyLabel::Enabled => Some(BountyState::Enabled),
            BountyLabel::Closing => Some(BountyState::Closing),
            BountyLabel::Closed => Some(BountyState::Closed),
            BountyLabel::Failed => Some(BountyState::Failed),
            BountyLabel::CloseFailed => Some(BountyState::CloseFailed),
            BountyLabel::ManualClose => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_paths_are_valid() {
        assert!(validate_transition(BountyState::Requested, BountyState::Processing).valid);
        assert!(validate_transition(BountyState::Processing, BountyState::Enabled).valid);
        assert!(validate_transition(BountyState::Processing, BountyState::Failed).valid);
        assert!(validate_transition(BountyState::Requested, BountyState::Enabled).valid);
        assert!(validate_transition(BountyState::Requested, BountyState::Closed).valid);
    }

    #[test]
    fn close_paths_are_valid() {
        assert!(validate_transition(BountyState::Enabled, BountyState::Closing).valid);
        assert!(validate_transition(BountyState::Closing, BountyState::Closed).valid);
        assert!(validate_transition(BountyState::Closing, BountyState::CloseFailed).valid);
        assert!(validate_transition(BountyState::Enabled, BountyState::Closed).valid);
    }

    #[test]
    fn skipping_states_is_invalid() {
        assert!(!validate_transition(BountyState::Requested, BountyState::Failed).valid);
        assert!(!validate_transition(BountyState::Processing, BountyState::Closing).valid);
        assert!(!validate_transition(BountyState::Closed, BountyState::Enabled).valid);
        assert!(!validate_transition(BountyState::Failed, BountyState::Enabled).valid);
    }

    #[test]
    fn same_state_is_a_no_op() {
        assert!(validate_transition(BountyState::Enabled, BountyState::Enabled).valid);
    }

    #[test]
    fn terminal_states() {
        assert!(is_terminal(BountyState::Closed));
        assert!(is_terminal(BountyState::Failed));
        assert!(is_terminal(BountyState::CloseFailed));
        assert!(!is_terminal(BountyState::Processing));
        assert!(!is_terminal(BountyState::Closing));
        assert!(!is_terminal(BountyState::Enabled));
    }

    #[test]
    fn labels_map_back_to_states() {
        for state in [
            BountyState::Requested,
            BountyState::Processing,
            BountyState::Enabled,
            BountyState::Closing,
            BountyState::Closed,
            BountyState::Failed,
            BountyState::CloseFailed,
        ] {
            assert_eq!(BountyState::from_label(state.label()), Some(state));
        }
        assert_eq!(BountyState::from_label(BountyLabel::ManualClose), None);
    }
}
