//! On-ledger bounty account model.
//!
//! Accounts are laid out as an 8-byte discriminator followed by
//! borsh-encoded fields, with allocation padding after the payload. The
//! engine only reads these; every mutation goes through the program.

use crate::domain::model::BountyScope;
use crate::foundation::{BountyError, Result, DISCRIMINATOR_SIZE};
use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};

/// Account name the program registers the bounty state under.
pub const BOUNTY_ACCOUNT_NAME: &str = "Bounty";

/// First eight bytes of sha256 over `"{namespace}:{name}"`.
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_SIZE] {
    let digest = Sha256::digest(format!("{}:{}", namespace, name).as_bytes());
    let mut out = [0u8; DISCRIMINATOR_SIZE];
    out.copy_from_slice(&digest[..DISCRIMINATOR_SIZE]);
    out
}

pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_SIZE] {
    discriminator("account", name)
}

pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_SIZE] {
    discriminator("global", name)
}

/// The ledger's stored truth for one bounty. Created by a successful
/// initialize commit, mutated only by a successful close commit, never
/// deleted. Absence of the account is itself a meaningful state.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BountyRecord {
    pub board_id: u32,
    pub bounty_id: u32,
    pub accepted_mint: [u8; 32],
    pub authority: [u8; 32],
    pub is_closed: bool,
    pub bounty_hunter: Option<String>,
    pub closed_at: Option<i64>,
}

impl BountyRecord {
    pub fn open(scope: BountyScope, accepted_mint: [u8; 32], authority: [u8; 32]) -> Self {
        Self {
            board_id: scope.repository.value(),
            bounty_id: scope.issue.value(),
            accepted_mint,
            authority,
            is_closed: false,
            bounty_hunter: None,
            closed_at: None,
        }
    }

    pub fn close(&mut self, bounty_hunter: Option<String>, closed_at: i64) {
        self.is_closed = true;
        self.bounty_hunter = bounty_hunter;
        self.closed_at = Some(closed_at);
    }

    /// Decodes a fetched account: discriminator check, then borsh fields.
    /// Trailing bytes are allocation padding and are ignored.
    pub fn from_account_data(data: &[u8]) -> Result<BountyRecord> {
        if data.len() < DISCRIMINATOR_SIZE {
            return Err(BountyError::SerializationError {
                format: "borsh".to_string(),
                details: format!("account data too short: {} bytes", data.len()),
            });
        }
        let expected = account_discriminator(BOUNTY_ACCOUNT_NAME);
        if data[..DISCRIMINATOR_SIZE] != expected {
            return Err(BountyError::SerializationError {
                format: "borsh".to_string(),
                details: "account discriminator mismatch".to_string(),
            });
        }
        let mut rest = &data[DISCRIMINATOR_SIZE..];
        BountyRecord::deserialize(&mut rest).map_err(|err| BountyError::SerializationError {
            format: "borsh".to_string(),
            details: err.to_string(),
        })
    }

    /// Inverse of [`BountyRecord::from_account_data`], without padding.
    pub fn to_account_data(&self) -> Result<Vec<u8>> {
        let mut out = account_discriminator(BOUNTY_ACCOUNT_NAME).to_vec();
        let fields = self.try_to_vec().map_err(|err| BountyError::SerializationError {
            format: "borsh".to_string(),
            details: err.to_string(),
        })?;
        out.extend_from_slice(&fields);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> BountyRecord {
        let scope = BountyScope::new(1296269.into(), 1347.into());
        BountyRecord::open(scope, [3u8; 32], [4u8; 32])
    }

    #[test]
    fn discriminators_are_stable_and_distinct() {
        assert_eq!(discriminator("account", "Bounty"), discriminator("account", "Bounty"));
        assert_ne!(account_discriminator("Bounty"), account_discriminator("Board"));
        assert_ne!(account_discriminator("Bounty"), instruction_discriminator("Bounty"));
    }

    #[test]
    fn account_data_round_trips() {
        let record = sample_record();
        let data = record.to_account_data().expect("encode");
        let decoded = BountyRecord::from_account_data(&data).expect("decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn decode_tolerates_allocation_padding() {
        let record = sample_record();
        let mut data = record.to_account_data().expect("encode");
        data.extend_from_slice(&[0u8; 64]);
        let decoded = BountyRecord::from_account_data(&data).expect("decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn decode_rejects_foreign_accounts() {
        let mut data = account_discriminator("Board").to_vec();
        data.extend_from_slice(&[0u8; 128]);
        assert!(BountyRecord::from_account_data(&data).is_err());
        assert!(BountyRecord::from_account_data(&[1, 2, 3]).is_err());
    }

    #[test]
    fn close_flips_the_flag_once() {
        let mut record = sample_record();
        assert!(!record.is_closed);
        record.close(Some("octocat".to_string()), 1_700_000_000);
        assert!(record.is_closed);
        assert_eq!(record.bounty_hunter.as_deref(), Some("octocat"));
        assert_eq!(record.closed_at, Some(1_700_000_000));
    }
}
