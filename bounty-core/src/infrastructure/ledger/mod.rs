use crate::domain::model::BountyScope;
use crate::domain::record::BountyRecord;
use crate::foundation::{BountyError, Result, TxSignature, ACCEPTED_MINT};
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Ledger port for one bounty program.
///
/// Writes are two-phase: every commit is preceded by a simulate call with
/// the same parameters, and both phases surface the same error taxonomy.
/// Commits never retry; a failed attempt is surfaced and left to a human
/// re-label.
#[async_trait]
pub trait BountyLedger: Send + Sync {
    /// `None` is the expected absent state, never an error.
    async fn fetch_record(&self, scope: BountyScope) -> Result<Option<BountyRecord>>;

    async fn simulate_initialize(&self, scope: BountyScope) -> Result<()>;

    async fn commit_initialize(&self, scope: BountyScope) -> Result<TxSignature>;

    async fn simulate_close(&self, scope: BountyScope, bounty_hunter: Option<&str>) -> Result<()>;

    async fn commit_close(&self, scope: BountyScope, bounty_hunter: Option<&str>) -> Result<TxSignature>;

    /// Connectivity probe for readiness reporting.
    async fn health_check(&self) -> Result<()>;
}

/// In-memory ledger with the program's observable semantics: create refuses
/// an existing account, close refuses a missing or already-closed one.
pub struct InMemoryLedger {
    records: Mutex<HashMap<BountyScope, BountyRecord>>,
    sequence: AtomicU64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self { records: Mutex::new(HashMap::new()), sequence: AtomicU64::new(0) }
    }

    pub fn with_records(records: Vec<(BountyScope, BountyRecord)>) -> Self {
        Self { records: Mutex::new(records.into_iter().collect()), sequence: AtomicU64::new(0) }
    }

    pub fn insert_record(&self, scope: BountyScope, record: BountyRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(scope, record);
        }
    }

    pub fn record(&self, scope: BountyScope) -> Option<BountyRecord> {
        self.records.lock().ok().and_then(|records| records.get(&scope).cloned())
    }

    fn next_signature(&self) -> TxSignature {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed);
        TxSignature::new(format!("FakeSignature{}", n))
    }

    fn accepted_mint_bytes() -> [u8; 32] {
        Pubkey::from_str(ACCEPTED_MINT).map(|key| key.to_bytes()).unwrap_or_default()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BountyLedger for InMemoryLedger {
    async fn fetch_record(&self, scope: BountyScope) -> Result<Option<BountyRecord>> {
        let records = self.records.lock().map_err(|_| BountyError::Message("ledger lock poisoned".to_string()))?;
        Ok(records.get(&scope).cloned())
    }

    async fn simulate_initialize(&self, scope: BountyScope) -> Result<()> {
        let records = self.records.lock().map_err(|_| BountyError::Message("ledger lock poisoned".to_string()))?;
        if records.contains_key(&scope) {
            return Err(BountyError::simulation_rejected(
                "initialize_bounty",
                vec![format!("Allocate: bounty account for {} already in use", scope)],
            ));
        }
        Ok(())
    }

    async fn commit_initialize(&self, scope: BountyScope) -> Result<TxSignature> {
        let mut records = self.records.lock().map_err(|_| BountyError::Message("ledger lock poisoned".to_string()))?;
        if records.contains_key(&scope) {
            return Err(BountyError::commit_failed(
                "initialize_bounty",
                "account already in use",
                vec![format!("Allocate: bounty account for {} already in use", scope)],
            ));
        }
        records.insert(scope, BountyRecord::open(scope, Self::accepted_mint_bytes(), [0u8; 32]));
        Ok(self.next_signature())
    }

    async fn simulate_close(&self, scope: BountyScope, _bounty_hunter: Option<&str>) -> Result<()> {
        let records = self.records.lock().map_err(|_| BountyError::Message("ledger lock poisoned".to_string()))?;
        match records.get(&scope) {
            None => Err(BountyError::simulation_rejected(
                "close_bounty",
                vec![format!("Program log: no bounty account for {}", scope)],
            )),
            Some(record) if record.is_closed => Err(BountyError::simulation_rejected(
                "close_bounty",
                vec![format!("Program log: bounty {} is already closed", scope)],
            )),
            Some(_) => Ok(()),
        }
    }

    async fn commit_close(&self, scope: BountyScope, bounty_hunter: Option<&str>) -> Result<TxSignature> {
        let mut records = self.records.lock().map_err(|_| BountyError::Message("ledger lock poisoned".to_string()))?;
        let closed_at = self.sequence.load(Ordering::Relaxed) as i64;
        match records.get_mut(&scope) {
            None => Err(BountyError::commit_failed(
                "close_bounty",
                "no bounty account",
                vec![format!("Program log: no bounty account for {}", scope)],
            )),
            Some(record) if record.is_closed => Err(BountyError::commit_failed(
                "close_bounty",
                "bounty already closed",
                Vec::new(),
            )),
            Some(record) => {
                record.close(bounty_hunter.map(str::to_string), closed_at);
                Ok(self.next_signature())
            }
        }
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

pub mod solana;

pub use solana::SolanaLedger;

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> BountyScope {
        BountyScope::new(42.into(), 7.into())
    }

    #[tokio::test]
    async fn initialize_creates_exactly_once() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.fetch_record(scope()).await.expect("fetch").is_none());

        ledger.simulate_initialize(scope()).await.expect("simulate");
        let signature = ledger.commit_initialize(scope()).await.expect("commit");
        assert!(signature.as_str().starts_with("FakeSignature"));

        let record = ledger.fetch_record(scope()).await.expect("fetch").expect("record");
        assert!(!record.is_closed);

        // The account now exists; the ledger refuses the second create.
        assert!(ledger.simulate_initialize(scope()).await.is_err());
        let err = ledger.commit_initialize(scope()).await.expect_err("second create");
        assert!(matches!(err, BountyError::CommitFailed { .. }));
    }

    #[tokio::test]
    async fn close_flips_the_record_and_credits_the_hunter() {
        let ledger = InMemoryLedger::new();
        ledger.commit_initialize(scope()).await.expect("create");

        ledger.simulate_close(scope(), Some("octocat")).await.expect("simulate");
        ledger.commit_close(scope(), Some("octocat")).await.expect("commit");

        let record = ledger.record(scope()).expect("record");
        assert!(record.is_closed);
        assert_eq!(record.bounty_hunter.as_deref(), Some("octocat"));

        assert!(ledger.simulate_close(scope(), None).await.is_err());
    }

    #[tokio::test]
    async fn closing_an_absent_scope_is_rejected() {
        let ledger = InMemoryLedger::new();
        let err = ledger.simulate_close(scope(), None).await.expect_err("absent");
        assert!(matches!(err, BountyError::SimulationRejected { .. }));
    }
}
