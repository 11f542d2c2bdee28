//! Deterministic ledger address derivation.
//!
//! The program derives the same addresses on-chain from the same seeds, so
//! the encoding here is load-bearing: tag bytes, then fixed-width
//! little-endian identifiers, in this exact order. Any drift silently
//! targets a different account.

use crate::domain::model::BountyScope;
use crate::foundation::RepositoryId;
use solana_sdk::pubkey::Pubkey;

/// Namespace tag for the per-repository board account.
pub const BOARD_SEED: &[u8] = b"board";

/// Namespace tag for the per-issue bounty account.
pub const BOUNTY_SEED: &[u8] = b"bounty";

/// Both derived accounts for one scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BountyAddresses {
    pub board: Pubkey,
    pub bounty: Pubkey,
}

/// Board address for a repository: `["board", repository_id LE]`.
pub fn board_address(program_id: &Pubkey, repository: RepositoryId) -> Pubkey {
    let (address, _bump) = Pubkey::find_program_address(&[BOARD_SEED, &repository.to_le_bytes()], program_id);
    address
}

/// Bounty address for a scope: `["bounty", board address, issue_number LE]`.
/// The board address feeds the second stage, so the two-stage nesting is
/// part of the identity.
pub fn bounty_address(program_id: &Pubkey, scope: BountyScope) -> Pubkey {
    let board = board_address(program_id, scope.repository);
    let (address, _bump) = Pubkey::find_program_address(&[BOUNTY_SEED, board.as_ref(), &scope.issue.to_le_bytes()], program_id);
    address
}

pub fn derive_bounty_addresses(program_id: &Pubkey, scope: BountyScope) -> BountyAddresses {
    let board = board_address(program_id, scope.repository);
    let (bounty, _bump) = Pubkey::find_program_address(&[BOUNTY_SEED, board.as_ref(), &scope.issue.to_le_bytes()], program_id);
    BountyAddresses { board, bounty }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program_id() -> Pubkey {
        Pubkey::new_from_array([7u8; 32])
    }

    #[test]
    fn derivation_is_deterministic() {
        let scope = BountyScope::new(1296269.into(), 1347.into());
        assert_eq!(bounty_address(&program_id(), scope), bounty_address(&program_id(), scope));
        assert_eq!(board_address(&program_id(), scope.repository), board_address(&program_id(), scope.repository));
    }

    #[test]
    fn derivation_matches_the_ledger_primitive_seed_for_seed() {
        let scope = BountyScope::new(42.into(), 7.into());
        let (expected_board, _) = Pubkey::find_program_address(&[b"board", &42u32.to_le_bytes()], &program_id());
        let (expected_bounty, _) =
            Pubkey::find_program_address(&[b"bounty", expected_board.as_ref(), &7u32.to_le_bytes()], &program_id());
        let derived = derive_bounty_addresses(&program_id(), scope);
        assert_eq!(derived.board, expected_board);
        assert_eq!(derived.bounty, expected_bounty);
    }

    #[test]
    fn distinct_scopes_yield_distinct_addresses() {
        let base = bounty_address(&program_id(), BountyScope::new(1.into(), 1.into()));
        assert_ne!(base, bounty_address(&program_id(), BountyScope::new(1.into(), 2.into())));
        assert_ne!(base, bounty_address(&program_id(), BountyScope::new(2.into(), 1.into())));
        // Swapped identifiers must not collide either; the board stage keeps
        // repository and issue in different derivation positions.
        let swapped = bounty_address(&program_id(), BountyScope::new(7.into(), 42.into()));
        assert_ne!(bounty_address(&program_id(), BountyScope::new(42.into(), 7.into())), swapped);
    }

    #[test]
    fn different_programs_do_not_share_addresses() {
        let other_program = Pubkey::new_from_array([9u8; 32]);
        let scope = BountyScope::new(3.into(), 4.into());
        assert_ne!(bounty_address(&program_id(), scope), bounty_address(&other_program, scope));
    }
}
