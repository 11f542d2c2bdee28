use async_trait::async_trait;
use bounty_core::application::{EventDisposition, EventProcessor};
use bounty_core::domain::model::{BountyScope, TrackerEvent};
use bounty_core::domain::record::BountyRecord;
use bounty_core::foundation::{BountyError, Result, TxSignature};
use bounty_core::infrastructure::ledger::BountyLedger;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Ledger whose dry-run rejects every write. Counts commit attempts so
/// tests can prove the simulate phase gates the commit phase.
pub struct RejectingLedger {
    logs: Vec<String>,
    simulate_calls: AtomicU64,
    commit_calls: AtomicU64,
}

impl RejectingLedger {
    pub fn new(logs: &[&str]) -> Self {
        Self {
            logs: logs.iter().map(|line| line.to_string()).collect(),
            simulate_calls: AtomicU64::new(0),
            commit_calls: AtomicU64::new(0),
        }
    }

    pub fn simulate_calls(&self) -> u64 {
        self.simulate_calls.load(Ordering::Relaxed)
    }

    pub fn commit_calls(&self) -> u64 {
        self.commit_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BountyLedger for RejectingLedger {
    async fn fetch_record(&self, _scope: BountyScope) -> Result<Option<BountyRecord>> {
        Ok(None)
    }

    async fn simulate_initialize(&self, _scope: BountyScope) -> Result<()> {
        self.simulate_calls.fetch_add(1, Ordering::Relaxed);
        Err(BountyError::simulation_rejected("initialize_bounty", self.logs.clone()))
    }

    async fn commit_initialize(&self, _scope: BountyScope) -> Result<TxSignature> {
        self.commit_calls.fetch_add(1, Ordering::Relaxed);
        Err(BountyError::commit_failed("initialize_bounty", "commit reached despite rejection", Vec::new()))
    }

    async fn simulate_close(&self, _scope: BountyScope, _bounty_hunter: Option<&str>) -> Result<()> {
        self.simulate_calls.fetch_add(1, Ordering::Relaxed);
        Err(BountyError::simulation_rejected("close_bounty", self.logs.clone()))
    }

    async fn commit_close(&self, _scope: BountyScope, _bounty_hunter: Option<&str>) -> Result<TxSignature> {
        self.commit_calls.fetch_add(1, Ordering::Relaxed);
        Err(BountyError::commit_failed("close_bounty", "commit reached despite rejection", Vec::new()))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// Ledger modelling the account-creation race: every reader sees "absent"
/// and every simulation passes, but only the first commit may create the
/// account. The second concurrent initializer gets a commit failure, the
/// way the real ledger refuses an address already in use.
pub struct FirstWriterWinsLedger {
    created: AtomicBool,
    commit_attempts: AtomicU64,
}

impl FirstWriterWinsLedger {
    pub fn new() -> Self {
        Self { created: AtomicBool::new(false), commit_attempts: AtomicU64::new(0) }
    }

    pub fn commit_attempts(&self) -> u64 {
        self.commit_attempts.load(Ordering::Relaxed)
    }
}

impl Default for FirstWriterWinsLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BountyLedger for FirstWriterWinsLedger {
    async fn fetch_record(&self, _scope: BountyScope) -> Result<Option<BountyRecord>> {
        Ok(None)
    }

    async fn simulate_initialize(&self, _scope: BountyScope) -> Result<()> {
        Ok(())
    }

    async fn commit_initialize(&self, scope: BountyScope) -> Result<TxSignature> {
        let attempt = self.commit_attempts.fetch_add(1, Ordering::Relaxed);
        if self.created.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_ok() {
            Ok(TxSignature::new(format!("WinningSignature{}", attempt)))
        } else {
            Err(BountyError::commit_failed(
                "initialize_bounty",
                "account already in use",
                vec![format!("Allocate: bounty account for {} already in use", scope)],
            ))
        }
    }

    async fn simulate_close(&self, _scope: BountyScope, _bounty_hunter: Option<&str>) -> Result<()> {
        Err(BountyError::simulation_rejected("close_bounty", vec!["unsupported in this mock".to_string()]))
    }

    async fn commit_close(&self, _scope: BountyScope, _bounty_hunter: Option<&str>) -> Result<TxSignature> {
        Err(BountyError::commit_failed("close_bounty", "unsupported in this mock", Vec::new()))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// Processor that records delivered events instead of reconciling them.
#[derive(Default)]
pub struct RecordingProcessor {
    events: Mutex<Vec<TrackerEvent>>,
}

impl RecordingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackerEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EventProcessor for RecordingProcessor {
    async fn process(&self, event: TrackerEvent) -> Result<EventDisposition> {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
        Ok(EventDisposition::Ignored)
    }
}
